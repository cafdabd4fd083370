use serde_json::json;

/// Timeout for a single expected frame (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 2000;

/// How long a client waits before concluding nothing is coming (ms).
pub const SILENCE_MS: u64 = 300;

pub fn announce(room: &str) -> String {
    json!({ "roomId": room }).to_string()
}

pub fn offer(room: &str, sdp: &str) -> String {
    json!({ "roomId": room, "offer": { "type": "offer", "sdp": sdp } }).to_string()
}

pub fn answer(room: &str, sdp: &str) -> String {
    json!({ "roomId": room, "answer": { "type": "answer", "sdp": sdp } }).to_string()
}

pub fn candidate(room: &str, candidate: &str) -> String {
    json!({
        "roomId": room,
        "iceCandidate": { "candidate": candidate, "sdpMid": "0", "sdpMLineIndex": 0 }
    })
    .to_string()
}
