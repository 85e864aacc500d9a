//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter whose
//! level comes from `RUST_LOG`.
//!
//! ```bash
//! RUST_LOG=info cargo run -p order-bot     # one line per command
//! RUST_LOG=debug cargo run -p order-bot    # full records and store requests
//! RUST_LOG=order_store=debug,info cargo run -p order-bot
//! ```
//!
//! Service operations run inside `#[instrument]` spans carrying `user_id`, so
//! a store log line shows which command produced it:
//!
//! ```text
//! INFO place_order: Order placed user_id=42 day=2026-10-16 display_name=@alice
//! ```

/// Initializes the global subscriber. Call once, from `main`.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
