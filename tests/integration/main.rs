//! HTTP-level integration tests. Each module drives the real router over an
//! in-memory store.

mod helpers;

mod garden_test;
mod invitation_test;
mod member_test;
