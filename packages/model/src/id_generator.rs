use crc32fast::Hasher;
use std::collections::HashSet;

/// Generate a page ID from the page name using CRC32
pub fn get_page_id(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("page://") {
        buff = format!("page://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential ID generator for elements within a page
#[derive(Debug, Clone)]
pub struct IDGenerator {
    seed: String,
    count: u32,
    /// Ids that already exist and must not be handed out
    reserved: HashSet<String>,
}

impl IDGenerator {
    pub fn new(page_name: &str) -> Self {
        Self::from_seed(get_page_id(page_name))
    }

    pub fn from_seed(seed: String) -> Self {
        Self {
            seed,
            count: 0,
            reserved: HashSet::new(),
        }
    }

    /// Mark ids as taken, e.g. the ids of a tree built elsewhere
    pub fn reserve<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.reserved.extend(ids.into_iter().map(Into::into));
    }

    /// Generate the next unused ID
    pub fn new_id(&mut self) -> String {
        loop {
            self.count += 1;
            let id = format!("{}-{}", self.seed, self.count);
            if self.reserved.insert(id.clone()) {
                return id;
            }
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
