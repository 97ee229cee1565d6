//! Stream payload fixtures

/// Two tweets the way the sample stream delivers them, one per line
pub const TWEET_LINES: &[&[u8]] = &[
    b"{\"created_at\":\"Wed May 01 10:00:00 +0000 2024\",\"id\":1,\"text\":\"first\"}\r\n",
    b"{\"created_at\":\"Wed May 01 10:00:00 +0000 2024\",\"id\":2,\"text\":\"second\"}\r\n",
];

/// Keep-alive the streaming API sends between tweets
pub const KEEP_ALIVE: &[u8] = b"\r\n";

/// All tweet lines concatenated
pub fn tweet_bytes() -> Vec<u8> {
    TWEET_LINES.concat()
}
