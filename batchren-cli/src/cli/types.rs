use batchren_core::{DatePosition, DateSource, NumberingMode, Preview};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NumberModeArg {
    /// Replace the name with the number
    Sequential,
    /// Add the number to the end of the name
    Append,
}

impl From<NumberModeArg> for NumberingMode {
    fn from(arg: NumberModeArg) -> Self {
        match arg {
            NumberModeArg::Sequential => Self::Sequential,
            NumberModeArg::Append => Self::Append,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateArg {
    /// File modification time
    Modified,
    /// File creation time (inode change time where unavailable)
    Created,
    /// Today's date
    Current,
}

impl From<DateArg> for DateSource {
    fn from(arg: DateArg) -> Self {
        match arg {
            DateArg::Modified => Self::Modified,
            DateArg::Created => Self::Created,
            DateArg::Current => Self::Current,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatePositionArg {
    Prefix,
    Suffix,
}

impl From<DatePositionArg> for DatePosition {
    fn from(arg: DatePositionArg) -> Self {
        match arg {
            DatePositionArg::Prefix => Self::Prefix,
            DatePositionArg::Suffix => Self::Suffix,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum PreviewArg {
    Table,
    Summary,
    None,
}

impl From<PreviewArg> for Preview {
    fn from(arg: PreviewArg) -> Self {
        match arg {
            PreviewArg::Table => Self::Table,
            PreviewArg::Summary => Self::Summary,
            PreviewArg::None => Self::None,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for batchren_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}
