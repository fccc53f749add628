use super::operation::Operation;

/// One recorded schema change: a name, the migrations it builds on, and the
/// operations to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub name: String,
    pub dependencies: Vec<String>,
    pub operations: Vec<Operation>,
}

impl Migration {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            dependencies: Vec::new(),
            operations: Vec::new(),
        }
    }

    pub fn depends_on(mut self, name: &str) -> Self {
        self.dependencies.push(name.to_string());
        self
    }

    pub fn operation(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }
}
