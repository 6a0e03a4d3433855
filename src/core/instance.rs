//! Best-effort single-instance lock.
//!
//! The token is a tiny file named after the application identity that holds
//! the owner's process id. Attaching to a token whose owner is still alive
//! means another instance is running. Tokens left behind by a crashed
//! process, or holding something other than a pid, are reclaimed.

use crate::errors::{AppError, AppResult};
use log::{debug, warn};
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Debug)]
pub struct InstanceGuard {
    token: PathBuf,
    pid: u32,
    held: bool,
}

impl InstanceGuard {
    /// Acquire the token `token_name` inside `dir`.
    ///
    /// Returns `AlreadyRunning` when a live process holds it and
    /// `LockCreate` when the token cannot be created for any other reason.
    pub fn acquire(dir: &Path, token_name: &str) -> AppResult<Self> {
        let token = dir.join(token_name);
        let pid = std::process::id();

        // Attach: read-only look at an existing token.
        match fs::read_to_string(&token) {
            Ok(content) if content.trim().is_empty() => {
                // Tokens are published with their pid, so an empty one is
                // another writer mid-creation.
                debug!("instance token {} is empty", token.display());
                return Err(AppError::AlreadyRunning);
            }
            Ok(content) => match content.trim().parse::<u32>() {
                Ok(owner) if process_alive(owner) => {
                    debug!("instance token {} held by pid {}", token.display(), owner);
                    return Err(AppError::AlreadyRunning);
                }
                _ => {
                    warn!("removing stale instance token {}", token.display());
                    fs::remove_file(&token).map_err(|e| lock_create(&token, e))?;
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(lock_create(&token, e)),
        }

        // Write the pid into a temp file first, then link it into place
        // without replacing, so the token never exists half written.
        fs::create_dir_all(dir).map_err(|e| lock_create(&token, e))?;
        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| lock_create(&token, e))?;
        tmp.write_all(pid.to_string().as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(|e| lock_create(&token, e))?;
        match tmp.persist_noclobber(&token) {
            Ok(_) => {}
            // Lost a race with another instance starting at the same time.
            Err(e) if e.error.kind() == ErrorKind::AlreadyExists => {
                return Err(AppError::AlreadyRunning);
            }
            Err(e) => return Err(lock_create(&token, e.error)),
        }

        debug!("instance token {} acquired by pid {}", token.display(), pid);
        Ok(Self {
            token,
            pid,
            held: true,
        })
    }

    pub fn token(&self) -> &Path {
        &self.token
    }

    /// Detach from the token. Also runs on drop.
    pub fn release(mut self) -> AppResult<()> {
        self.detach()
    }

    fn detach(&mut self) -> AppResult<()> {
        if !self.held {
            return Ok(());
        }
        self.held = false;

        // Only remove a token that is still ours.
        match fs::read_to_string(&self.token) {
            Ok(content) if content.trim() == self.pid.to_string() => {
                fs::remove_file(&self.token)?;
                debug!("instance token {} released", self.token.display());
            }
            Ok(_) => warn!("instance token {} changed owner", self.token.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        Ok(())
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        if let Err(e) = self.detach() {
            warn!("failed to release instance token: {}", e);
        }
    }
}

fn lock_create(token: &Path, e: io::Error) -> AppError {
    AppError::LockCreate {
        path: token.display().to_string(),
        reason: e.to_string(),
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return false;
    };
    if pid <= 0 {
        return false;
    }
    // Signal 0 only checks existence; EPERM means it exists but is not ours.
    let rc = unsafe { libc::kill(pid, 0) };
    rc == 0 || io::Error::last_os_error().raw_os_error() == Some(libc::EPERM)
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // No portable liveness check; treat any recorded owner as alive.
    true
}
