use heptathlon::app;
use heptathlon::error::AppError;

fn main() {
    if let Err(err) = app::run() {
        match &err {
            AppError::FileAccess { path, source } => {
                eprintln!(
                    "File \"{}\" could not be read, please review the error message:",
                    path.display()
                );
                eprintln!("{source}");
                eprintln!("Exiting...");
            }
            other => eprintln!("application error: {other}"),
        }
        std::process::exit(1);
    }
}
