use crate::application::service::PetRequest;
use crate::error::{PetError, Result};
use std::io::Read;

/// Reads pet requests from a CSV source with the header `fid,action,item,now`.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<PetRequest>`.
/// Whitespace is trimmed, empty cells read as absent and short rows are accepted.
pub struct RequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RequestReader<R> {
    /// Creates a new `RequestReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<PetRequest>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(PetError::from))
    }
}
