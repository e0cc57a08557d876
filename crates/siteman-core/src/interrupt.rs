// crates/siteman-core/src/interrupt.rs - Interrupt signal bookkeeping
//
// SIGINT/SIGTERM do not kill the process outright once `install` has run;
// they raise a flag instead. Long-running steps check the flag at safe points
// (e.g. right before a temporary front-matter file replaces the original) and
// bail out with `ContentError::Interrupted`, letting drop guards clean up.
//
// Child processes (editor, fzf, hugo, rsync) receive the terminal's SIGINT
// themselves; their non-zero exit is reported as a collaborator failure.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use signal_hook::consts::signal::{SIGINT, SIGTERM};

static FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

fn flag() -> &'static Arc<AtomicBool> {
    FLAG.get_or_init(|| Arc::new(AtomicBool::new(false)))
}

/// Register the interrupt handlers. Safe to call more than once.
pub fn install() -> io::Result<()> {
    let flag = flag();
    signal_hook::flag::register(SIGINT, Arc::clone(flag))?;
    signal_hook::flag::register(SIGTERM, Arc::clone(flag))?;
    Ok(())
}

/// Whether an interrupt has been received since startup
pub fn is_interrupted() -> bool {
    flag().load(Ordering::SeqCst)
}
