use crate::domain::pet::{PetState, PetVariant};
use crate::error::Result;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct PetRow<'a> {
    fid: &'a str,
    hunger: u8,
    happiness: u8,
    coins: u64,
    last_notified: Option<i64>,
    variant: Option<PetVariant>,
}

impl<'a> From<&'a PetState> for PetRow<'a> {
    fn from(pet: &'a PetState) -> Self {
        Self {
            fid: pet.fid.as_str(),
            hunger: pet.hunger,
            happiness: pet.happiness,
            coins: pet.coins,
            last_notified: pet.last_notified,
            variant: pet.variant,
        }
    }
}

/// Writes final pet snapshots as CSV with the header
/// `fid,hunger,happiness,coins,last_notified,variant`.
/// Unset optional fields are written as empty cells.
pub struct PetWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PetWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_pets<I>(&mut self, pets: I) -> Result<()>
    where
        I: IntoIterator<Item = PetState>,
    {
        let mut wrote_any = false;
        for pet in pets {
            self.writer.serialize(PetRow::from(&pet))?;
            wrote_any = true;
        }
        if !wrote_any {
            self.writer.write_record([
                "fid",
                "hunger",
                "happiness",
                "coins",
                "last_notified",
                "variant",
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
