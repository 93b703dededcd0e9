mod api_error;
mod config;
mod debounce;
mod envelope;
mod filter;
mod optimistic;
mod session;
