pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";

pub const DEFAULT_RELAY_PORT: u16 = 8080;

pub const DEFAULT_RELAY_URL: &str = "ws://localhost:8080";
