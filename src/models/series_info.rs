/// Identity of a series exposed by a [`crate::source::SeriesSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl SeriesInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
