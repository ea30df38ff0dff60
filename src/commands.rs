//! This module defines the `Command` enum and its associated methods for parsing
//! the commands of the interactive shell.
//!
//! The `Command` enum represents the commands that the user can input once a disk
//! image has been decoded: printing regions, reading files and MFT records,
//! writing raw clusters, or handling invalid or unknown input.

/// Represents a user command in the disk image shell.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Command to quit the program.
    Quit,
    /// Print the boot sectors and layouts of both regions.
    Print,
    /// List the FAT root directory.
    Dir,
    /// Read the FAT file at this root directory index.
    Cat(usize),
    /// Decode the MFT record at this index.
    Mft(u64),
    /// Write the content of a host file at an NTFS cluster.
    Write((String, u64)),
    /// Decode the NTFS region at this byte offset.
    Ntfs(u64),
    /// Skip the boot sector validation
    Skip,
    /// Command for an unknown input, encapsulating the raw input as a `String`.
    Unknown(String),
    /// Command for invalid input, encapsulating an error message as a `String`.
    Invalid(String),
    /// Command for an empty input.
    Empty,
}

impl Command {
    /// Parses a string into a `Command` instance.
    ///
    /// # Returns
    /// - `Command::Quit` if the input is "quit".
    /// - `Command::Print` if the input is "print".
    /// - `Command::Dir` if the input is "dir".
    /// - `Command::Cat` if the input is "cat" followed by an entry index.
    /// - `Command::Mft` if the input is "mft" followed by a record index.
    /// - `Command::Write` if the input is "write" followed by a cluster and a file path.
    /// - `Command::Ntfs` if the input is "ntfs" followed by a byte offset.
    /// - `Command::Skip` if the input is "skip".
    /// - `Command::Invalid` if an argument is missing or cannot be parsed.
    /// - `Command::Unknown` if the input does not match any known command.
    /// - `Command::Empty` if the input is empty or contains only whitespace.
    pub fn from_string(s: &str) -> Self {
        let mut parts = s.split_whitespace();
        match parts.next() {
            Some("quit") => Command::Quit,
            Some("print") => Command::Print,
            Some("dir") => Command::Dir,
            Some("cat") => match Self::number_arg(parts.next(), "cat", "the entry index") {
                Ok(nb) => Command::Cat(nb),
                Err(cmd) => cmd,
            },
            Some("mft") => match Self::number_arg(parts.next(), "mft", "the record index") {
                Ok(nb) => Command::Mft(nb),
                Err(cmd) => cmd,
            },
            Some("write") => {
                let cluster = match Self::number_arg(parts.next(), "write", "the cluster number") {
                    Ok(nb) => nb,
                    Err(cmd) => return cmd,
                };
                match parts.next() {
                    Some(path) => Command::Write((path.to_string(), cluster)),
                    None => Command::Invalid(String::from(
                        "Missing arg: 'write' expects the path of the file to copy.",
                    )),
                }
            }
            Some("ntfs") => match Self::number_arg(parts.next(), "ntfs", "the region byte offset") {
                Ok(nb) => Command::Ntfs(nb),
                Err(cmd) => cmd,
            },
            Some("skip") => Command::Skip,
            Some(other) => Command::Unknown(other.to_string()),
            None => Command::Empty,
        }
    }

    fn number_arg<N: std::str::FromStr>(
        arg: Option<&str>,
        cmd: &str,
        what: &str,
    ) -> Result<N, Command> {
        match arg {
            Some(arg) => arg.parse::<N>().map_err(|_| {
                Command::Invalid(format!(
                    "Arg parsing error: '{cmd}' expects an unsigned integer."
                ))
            }),
            None => Err(Command::Invalid(format!(
                "Missing arg: '{cmd}' expects {what}."
            ))),
        }
    }
}
