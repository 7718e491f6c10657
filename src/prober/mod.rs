pub mod tcp_connect;

pub use tcp_connect::probe_tcp;
