//! ID type wrappers for type safety.

mod id_macro;
pub mod reminder_id;

pub use reminder_id::ReminderId;
