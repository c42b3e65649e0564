pub mod shared {
    pub mod infrastructure {
        pub mod clock;
        pub mod intent_outbox;
    }
}

pub mod modules {
    pub mod reservations {
        pub mod core {
            pub mod actor;
            pub mod check_in;
            pub mod device;
            pub mod events;
            pub mod evolve;
            pub mod intents;
            pub mod mutations;
            pub mod ports;
            pub mod reservation;
            pub mod time_adjustment;
            pub mod time_model;
            pub mod time_slot;
            pub mod transitions;
        }
        pub mod application {
            pub mod errors;
        }
        pub mod use_cases {
            pub mod find_available_devices {
                pub mod availability;
                pub mod handler;
                pub mod query;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod reserve_device {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod transition_reservation {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod sweep_reservations {
                pub mod decide;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod record_time_adjustment {
                pub mod command;
                pub mod decide;
                pub mod decision;
                pub mod handler;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod http_support;
            }
            pub mod outbound {
                pub mod in_memory_store;
                pub mod intent_outbox;
            }
        }
    }
}

pub mod shell;
