pub mod common;

mod retry;
