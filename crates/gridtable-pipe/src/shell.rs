use std::io::{self, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Command `{program}` failed with status {status}: {stderr}")]
    CommandFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },
}

/// Run `program` with `args`, optionally feeding `input` on stdin, and
/// return everything it wrote to stdout.
///
/// Stdout and stderr are drained on their own threads while the child runs,
/// so a converter producing a large document cannot block on a full pipe.
///
/// # Arguments
///
/// * `program` - The executable to run (looked up on `PATH`)
/// * `args` - Arguments passed verbatim, no shell involved
/// * `input` - Bytes written to the child's stdin; `None` attaches `/dev/null`
/// * `timeout` - Optional limit; if exceeded, the process is killed
pub fn run_capture(
    program: &str,
    args: &[String],
    input: Option<&[u8]>,
    timeout: Option<Duration>,
) -> Result<Vec<u8>, ShellError> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(program, args = args.len(), "spawning converter process");
    let started = Instant::now();
    let mut child = cmd.spawn().map_err(|source| ShellError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    if let (Some(data), Some(mut stdin)) = (input, child.stdin.take()) {
        match stdin.write_all(data) {
            Ok(()) => {}
            // The child stopped reading; its exit status says why.
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                debug!(program, "converter closed its input early");
            }
            Err(err) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(ShellError::Io(err));
            }
        }
    }

    let status = match timeout {
        Some(duration) => match child.wait_timeout(duration)? {
            Some(status) => status,
            None => {
                child.kill()?;
                child.wait()?;
                warn!(program, ?duration, "converter process timed out");
                return Err(ShellError::Timeout(program.to_string(), duration));
            }
        },
        None => child.wait()?,
    };

    let output = collect(stdout)?;
    let errors = collect(stderr)?;
    debug!(program, %status, elapsed = ?started.elapsed(), bytes = output.len(), "converter finished");

    if !status.success() {
        return Err(ShellError::CommandFailed {
            program: program.to_string(),
            status,
            stderr: String::from_utf8_lossy(&errors).trim().to_string(),
        });
    }

    Ok(output)
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<io::Result<Vec<u8>>>> {
    pipe.map(|mut pipe| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            pipe.read_to_end(&mut buf)?;
            Ok(buf)
        })
    })
}

fn collect(reader: Option<JoinHandle<io::Result<Vec<u8>>>>) -> io::Result<Vec<u8>> {
    match reader {
        Some(handle) => handle
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("pipe reader thread panicked"))),
        None => Ok(Vec::new()),
    }
}
