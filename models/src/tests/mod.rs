mod job;
mod session;
