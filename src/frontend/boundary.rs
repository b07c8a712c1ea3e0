//! Top-level error boundary for the interactive front-end.
//!
//! Errors and panics of the guarded code end up in a diagnostic file instead of
//! tearing the dialog down with a trace.

use chrono::Utc;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fs::OpenOptions;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use std::sync::Once;

thread_local! {
    static GUARDED: Cell<bool> = Cell::new(false);
    static PANIC_SITE: RefCell<Option<String>> = RefCell::new(None);
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the current panic hook: panics inside [`guard`] only record their
/// location, other panics go to the previous hook.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            if GUARDED.with(Cell::get) {
                let site = panic_info
                    .location()
                    .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()));
                PANIC_SITE.with(|cell| *cell.borrow_mut() = site);
            } else {
                previous(panic_info);
            }
        }));
    });
}

/// Run `f`, returning `true` if it finished with `Ok`.
pub fn guard<F>(error_log: &Path, f: F) -> bool
where
    F: FnOnce() -> anyhow::Result<()>,
{
    install_quiet_hook();
    let was_guarded = GUARDED.with(|guarded| guarded.replace(true));
    let outcome = panic::catch_unwind(AssertUnwindSafe(f));
    GUARDED.with(|guarded| guarded.set(was_guarded));

    let fault = match outcome {
        Ok(Ok(())) => return true,
        Ok(Err(error)) => format!("{error:?}"),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            match PANIC_SITE.with(|cell| cell.borrow_mut().take()) {
                Some(site) => format!("panic at {site}: {message}"),
                None => format!("panic: {message}"),
            }
        }
    };
    log::debug!("{fault}");
    if let Err(error) = append_fault(error_log, &fault) {
        log::error!("cannot write {}: {error}", error_log.display());
    }
    false
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn append_fault(path: &Path, fault: &str) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "---- Error ----")?;
    writeln!(file, "{}", Utc::now().format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(file, "{fault}")?;
    Ok(())
}
