use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read the record at the specified index
    Read {
        /// Zero-based record index
        index: u64,
    },

    /// Write a record at the specified index
    Write {
        /// Zero-based record index
        index: u64,

        /// Record key (truncated to 7 bytes)
        key: String,

        /// Record value (truncated to 31 bytes)
        value: String,
    },
}
