//! HDFS access through the `hdfs dfs` command line client
//!
//! Each operation runs one client invocation. When an endpoint is set it
//! is passed with the generic `-fs` option, overriding `fs.defaultFS`.

use crate::error::{CachetError, CachetResult};
use crate::remote::client::{RemoteFs, RemoteStream};
use async_trait::async_trait;
use std::ffi::OsStr;
use std::future::Future;
use std::io;
use std::path::Path;
use std::pin::Pin;
use std::process::{ExitStatus, Stdio};
use std::task::{ready, Context, Poll};
use tokio::io::{AsyncRead, ReadBuf};
use tokio::process::{ChildStdout, Command};
use tracing::debug;

/// Remote client that shells out to `hdfs dfs`
#[derive(Debug, Clone)]
pub struct HdfsCli {
    program: String,
    endpoint: Option<String>,
}

impl HdfsCli {
    /// Create a client running `program`, optionally against `endpoint`
    pub fn new(program: impl Into<String>, endpoint: Option<String>) -> Self {
        Self {
            program: program.into(),
            endpoint,
        }
    }

    /// Build the argument list for a `dfs` subcommand
    fn args<'a>(&'a self, op: &[&'a OsStr]) -> Vec<&'a OsStr> {
        let mut args = vec![OsStr::new("dfs")];
        if let Some(ref endpoint) = self.endpoint {
            args.extend([OsStr::new("-fs"), OsStr::new(endpoint)]);
        }
        args.extend_from_slice(op);
        args
    }

    fn display(&self, args: &[&OsStr]) -> String {
        let args: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
        format!("{} {}", self.program, args.join(" "))
    }

    /// Run a client command and return the output
    async fn exec(&self, op: &[&OsStr]) -> CachetResult<std::process::Output> {
        let args = self.args(op);
        debug!("Executing: {}", self.display(&args));

        Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| CachetError::command_failed(self.display(&args), e))
    }
}

/// Exit code of `dfs -test` when the path does not exist
const TEST_ABSENT_CODE: i32 = 1;

fn os(s: &str) -> &OsStr {
    OsStr::new(s)
}

#[async_trait]
impl RemoteFs for HdfsCli {
    async fn exists(&self, identifier: &str) -> CachetResult<bool> {
        let output = self.exec(&[os("-test"), os("-e"), os(identifier)]).await?;

        // stderr carries client log noise either way; only the exit code is reliable
        match output.status.code() {
            Some(0) => Ok(true),
            Some(TEST_ABSENT_CODE) => Ok(false),
            _ => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(CachetError::transfer(
                    identifier,
                    format!("{} ({})", stderr.trim(), output.status),
                ))
            }
        }
    }

    async fn open_read(&self, identifier: &str) -> CachetResult<RemoteStream> {
        let args = self.args(&[os("-cat"), os(identifier)]);
        debug!("Streaming: {}", self.display(&args));

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CachetError::command_failed(self.display(&args), e))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| CachetError::Internal("hdfs -cat stdout not piped".to_string()))?;

        Ok(Box::new(CatStream {
            stdout,
            exit: Some(Box::pin(async move { child.wait().await })),
            identifier: identifier.to_string(),
        }))
    }

    async fn copy_to_local(&self, identifier: &str, local_path: &Path) -> CachetResult<()> {
        let output = self
            .exec(&[os("-get"), os("-f"), os(identifier), local_path.as_os_str()])
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(CachetError::transfer(identifier, stderr.trim()))
        }
    }

    fn backend_name(&self) -> &'static str {
        "hdfs"
    }
}

type ExitFuture = Pin<Box<dyn Future<Output = io::Result<ExitStatus>> + Send>>;

/// Stdout of `hdfs dfs -cat` that turns a failed exit into a read error
struct CatStream {
    stdout: ChildStdout,
    exit: Option<ExitFuture>,
    identifier: String,
}

impl AsyncRead for CatStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if buf.remaining() == 0 {
            return Poll::Ready(Ok(()));
        }

        let before = buf.filled().len();
        ready!(Pin::new(&mut this.stdout).poll_read(cx, buf))?;
        if buf.filled().len() > before {
            return Poll::Ready(Ok(()));
        }

        // EOF: the stream is only complete if the client exited cleanly
        let Some(exit) = this.exit.as_mut() else {
            return Poll::Ready(Ok(()));
        };
        let status = ready!(exit.as_mut().poll(cx))?;
        this.exit = None;

        if status.success() {
            Poll::Ready(Ok(()))
        } else {
            Poll::Ready(Err(io::Error::other(format!(
                "hdfs -cat {} exited with {}",
                this.identifier, status
            ))))
        }
    }
}
