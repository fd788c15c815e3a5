#![allow(dead_code)]

use std::sync::Arc;

use flockr::{AuthResponse, Config, ManualScheduler, Server};

/// A server with throwaway hashing costs and a clock the test drives.
pub fn server() -> (Server, Arc<ManualScheduler>) {
    let config = Config {
        hash_memory_kib: 8,
        hash_iterations: 1,
        words: vec!["RUST".to_owned()],
        ..Config::default()
    };
    let scheduler = Arc::new(ManualScheduler::new());
    (Server::with_scheduler(config, scheduler.clone()), scheduler)
}

pub async fn register(server: &Server, email: &str, first: &str, last: &str) -> AuthResponse {
    server
        .register(email, "password123", first, last)
        .await
        .unwrap_or_else(|e| panic!("register {email}: {e}"))
}

pub async fn message_count(server: &Server, token: &str, channel_id: u32) -> usize {
    server.channel_messages(token, channel_id, 0).await.unwrap().messages.len()
}

pub async fn newest(server: &Server, token: &str, channel_id: u32) -> String {
    server.channel_messages(token, channel_id, 0).await.unwrap().messages[0]
        .message
        .clone()
}
