use std::fmt;

#[derive(Debug)]
pub enum NucReactError {
    Io { path: String, message: String },
    Malformed { line: usize, reason: String },
    UnknownElement(String),
    UnknownIsotope { symbol: String, mass_number: u16 },
    InvalidReaction(String),
    InvalidGrid(String),
    CurveLengthMismatch { lab_energy: usize, values: usize },
}

pub type Result<T> = std::result::Result<T, NucReactError>;

impl fmt::Display for NucReactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "cannot read mass table '{path}': {message}"),
            Self::Malformed { line, reason } => {
                write!(f, "malformed mass table line {line}: {reason}")
            }
            Self::UnknownElement(symbol) => write!(f, "unknown element: {symbol}"),
            Self::UnknownIsotope {
                symbol,
                mass_number,
            } => write!(f, "unknown isotope: {mass_number}{symbol}"),
            Self::InvalidReaction(msg) => write!(f, "invalid reaction: {msg}"),
            Self::InvalidGrid(msg) => write!(f, "invalid energy grid: {msg}"),
            Self::CurveLengthMismatch { lab_energy, values } => write!(
                f,
                "curve has {lab_energy} lab energies but {values} values"
            ),
        }
    }
}

impl std::error::Error for NucReactError {}
