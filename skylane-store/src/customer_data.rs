use crate::{parse_u32, split_record, DataManager, StoreError, SEPARATOR};
use skylane_core::{Customer, Registry};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

/// Customer records, one per line: id, name, phone, email.
pub struct CustomerDataManager {
    path: PathBuf,
}

impl CustomerDataManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DataManager for CustomerDataManager {
    fn load(&self, registry: &mut Registry) -> Result<(), StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            // A missing file is an empty collection (first run).
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };

        for (idx, line) in contents.lines().enumerate() {
            let line_no = idx + 1;
            if line.is_empty() {
                continue;
            }
            let fields = split_record(line, line_no, 4)?;
            let id = parse_u32(fields[0], "customer id", line_no)?;
            let customer = Customer::new(
                id,
                fields[1].to_string(),
                fields[2].to_string(),
                fields[3].to_string(),
            );
            registry.add_customer(customer)?;
        }
        Ok(())
    }

    fn store(&self, registry: &Registry) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&self.path)?;
        for customer in registry.customers() {
            writeln!(
                out,
                "{}",
                [
                    customer.id.to_string(),
                    customer.name.clone(),
                    customer.phone.clone(),
                    customer.email.clone(),
                ]
                .join(SEPARATOR)
            )?;
        }
        Ok(())
    }
}
