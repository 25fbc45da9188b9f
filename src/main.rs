use std::process::ExitCode;

use sample_emitter::app::Application;

fn main() -> ExitCode {
    let exit_code = match Application::prepare() {
        Ok(app) => app.run(),
        Err(code) => code,
    };
    ExitCode::from(exit_code as u8)
}
