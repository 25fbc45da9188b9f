mod emitter;
mod process;
mod random;

pub use self::emitter::*;
pub use self::process::*;
pub use self::random::*;

/// A notable occurrence inside the emitter, reported through logging.
pub trait InternalEvent: Sized {
    fn emit(self);
}

#[macro_export]
macro_rules! emit {
    ($event:expr) => {
        $crate::internal_events::InternalEvent::emit($event)
    };
}
