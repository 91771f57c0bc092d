use crc32fast::Hasher;

/// Derive a stable id seed from a parcour name using CRC32
pub fn parcour_seed(name: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential id generator for objects within a parcour.
///
/// Ids are opaque strings, generated once and never reassigned. A deleted
/// object's id simply becomes invalid for lookups.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: parcour_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate the next sequential id
    pub fn new_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// Advance the counter past ids already present in a loaded document
    pub fn skip_past<'a>(&mut self, existing: impl Iterator<Item = &'a str>) {
        for id in existing {
            if let Some(rest) = id.strip_prefix(self.seed.as_str()) {
                if let Ok(n) = rest.trim_start_matches('-').parse::<u32>() {
                    self.count = self.count.max(n);
                }
            }
        }
    }
}
