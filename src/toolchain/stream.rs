use crate::core::{RepoError, RepoResult};
use crate::package::module::ModuleRecord;
use serde_json::de::IoRead;
use serde_json::{Deserializer, StreamDeserializer};
use std::io::{BufReader, Read};
use std::process::Child;

type RecordReader = Box<dyn Read + Send>;

/// Lazily decoded sequence of concatenated JSON module records.
///
/// When backed by a child process, records are decoded straight from its
/// stdout as they arrive. Once the output ends the child is reaped and an
/// unsuccessful exit status is yielded as a final error. The stream cannot
/// be restarted; dropping it early kills the child.
pub struct ModuleStream {
    command: String,
    records: StreamDeserializer<'static, IoRead<RecordReader>, ModuleRecord>,
    child: Option<Child>,
    done: bool,
}

impl ModuleStream {
    /// Decode records from any reader. `command` names the producer in errors.
    pub fn from_reader<R>(command: impl Into<String>, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        // The decoder pulls one byte per read; buffer so a pipe is not
        // drained one syscall at a time.
        let reader: RecordReader = Box::new(BufReader::new(reader));
        Self {
            command: command.into(),
            records: Deserializer::from_reader(reader).into_iter::<ModuleRecord>(),
            child: None,
            done: false,
        }
    }

    /// Decode records from a spawned child's piped stdout.
    pub fn from_child(command: impl Into<String>, mut child: Child) -> RepoResult<Self> {
        let command = command.into();
        let stdout = match child.stdout.take() {
            Some(stdout) => stdout,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(RepoError::toolchain(command, "stdout was not captured"));
            }
        };

        let mut stream = Self::from_reader(command, stdout);
        stream.child = Some(child);
        Ok(stream)
    }

    /// The command whose output this stream decodes.
    pub fn command(&self) -> &str {
        &self.command
    }

    fn finish(&mut self) -> RepoResult<()> {
        self.done = true;

        if let Some(mut child) = self.child.take() {
            let status = child
                .wait()
                .map_err(|e| RepoError::toolchain(&self.command, e.to_string()))?;
            if !status.success() {
                return Err(RepoError::toolchain(
                    &self.command,
                    format!("exited with {}", status),
                ));
            }
        }

        Ok(())
    }
}

impl Iterator for ModuleStream {
    type Item = RepoResult<ModuleRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.records.next() {
            Some(Ok(record)) => Some(Ok(record)),
            Some(Err(e)) => {
                self.done = true;
                Some(Err(RepoError::decode(&self.command, e.to_string())))
            }
            None => self.finish().err().map(Err),
        }
    }
}

impl Drop for ModuleStream {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}
