//! Plain-text liveness greeting.

pub async fn hello() -> &'static str {
    "Hello World"
}
