use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::{AccountRecord, DiagnosticSink, Error, NewAccount, PasswordHasher};

/// Accounts kept one per line in a space-delimited text file.
///
/// Every call reopens and rescans the file. There is no locking, so two
/// processes registering at once can be handed the same primary key.
#[derive(Debug)]
pub struct FlatFileStore<H, D>
where
    H: PasswordHasher,
    D: DiagnosticSink,
{
    path: PathBuf,
    hasher: H,
    diagnostics: D,
}

impl<H, D> FlatFileStore<H, D>
where
    H: PasswordHasher,
    D: DiagnosticSink,
{
    pub fn new(path: impl Into<PathBuf>, hasher: H, diagnostics: D) -> Self {
        Self {
            path: path.into(),
            hasher,
            diagnostics,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `max(existing keys) + 1`, or 1 for a missing or empty store.
    pub fn next_primary_key(&self) -> Result<u64, Error> {
        self.reported(self.scan_next_key())
    }

    /// Appends the account and returns its primary key.
    pub fn register(&self, account: &NewAccount) -> Result<u64, Error> {
        self.reported(self.append_account(account))
    }

    /// Primary key of the first record matching both username and password.
    pub fn login(&self, username: &str, password: &str) -> Result<u64, Error> {
        self.reported(self.find_account(username, password))
    }

    fn reported<T>(&self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(e) = &result {
            self.diagnostics.report(e);
        }
        result
    }

    fn record_reader(file: File) -> csv::Reader<File> {
        csv::ReaderBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(file)
    }

    fn scan_next_key(&self) -> Result<u64, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(1),
            Err(e) => return Err(e.into()),
        };

        let mut last_key = 0;
        for record in Self::record_reader(file).records() {
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable store line");
                    continue;
                }
            };
            if let Some(key) = record.get(0).and_then(|f| f.parse::<u64>().ok()) {
                last_key = last_key.max(key);
            }
        }

        last_key
            .checked_add(1)
            .ok_or_else(|| Error::Overflow(format!("primary key after {}", last_key)))
    }

    fn append_account(&self, account: &NewAccount) -> Result<u64, Error> {
        validate_field("username", &account.username)?;
        validate_field("password", &account.password)?;
        validate_field("email", &account.email)?;
        validate_field("phone number", &account.phone_number)?;

        let primary_key = self.scan_next_key()?;
        let record = AccountRecord {
            primary_key,
            username: account.username.clone(),
            password_hash: self.hasher.hash(&account.password)?,
            email: account.email.clone(),
            phone_number: account.phone_number.clone(),
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b' ')
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);
        wtr.serialize(&record)?;
        wtr.flush()?;

        tracing::info!(primary_key, username = %record.username, "registered account");
        Ok(primary_key)
    }

    fn find_account(&self, username: &str, password: &str) -> Result<u64, Error> {
        let file = File::open(&self.path)?;

        for record in Self::record_reader(file).deserialize::<AccountRecord>() {
            let record = match record {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed account record");
                    continue;
                }
            };
            if record.username == username && self.hasher.verify(password, &record.password_hash)
            {
                tracing::info!(primary_key = record.primary_key, username, "login succeeded");
                return Ok(record.primary_key);
            }
        }

        Err(Error::Authentication(username.to_string()))
    }
}

fn validate_field(field: &'static str, value: &str) -> Result<(), Error> {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return Err(Error::InvalidField { field });
    }
    Ok(())
}
