use super::InternalEvent;

#[derive(Debug)]
pub struct EntropySourceProbed;

impl InternalEvent for EntropySourceProbed {
    fn emit(self) {
        trace!(message = "Operating system entropy source is available.");
    }
}

#[derive(Debug)]
pub struct RandomSourceFailed<'a> {
    pub error: &'a crate::random::RandomError,
}

impl InternalEvent for RandomSourceFailed<'_> {
    fn emit(self) {
        error!(
            message = "Unable to build the randomness source.",
            error = %self.error,
        );
    }
}
