/// A single static-analysis finding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offense {
    rule_id: String,
    message: String,
    auto_correctable: bool,
}

impl Offense {
    pub fn new(rule_id: String, message: String, auto_correctable: bool) -> Self {
        Self {
            rule_id,
            message,
            auto_correctable,
        }
    }

    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn auto_correctable(&self) -> bool {
        self.auto_correctable
    }
}

/// Offenses found in one file, in the order the analyzer emitted them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOffenses {
    path: String,
    offenses: Vec<Offense>,
}

impl FileOffenses {
    pub fn new(path: String, offenses: Vec<Offense>) -> Self {
        Self { path, offenses }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn offenses(&self) -> &[Offense] {
        &self.offenses
    }

    pub fn correctable_count(&self) -> usize {
        self.offenses.iter().filter(|o| o.auto_correctable()).count()
    }
}
