//! The table-backed resources exposed over HTTP and their user-facing messages.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    State,
    City,
    Neighborhood,
    User,
    Author,
    Category,
    Book,
}

impl Resource {
    /// Display label used in response messages
    pub fn label(self) -> &'static str {
        match self {
            Resource::State => "Estado",
            Resource::City => "Cidade",
            Resource::Neighborhood => "Bairro",
            Resource::User => "Usuário",
            Resource::Author => "Autor",
            Resource::Category => "Categoria",
            Resource::Book => "Livro",
        }
    }

    fn feminine(self) -> bool {
        matches!(self, Resource::City | Resource::Category)
    }

    fn inflect(self, stem: &str) -> String {
        let ending = if self.feminine() { "a" } else { "o" };
        format!("{} {}{}", self.label(), stem, ending)
    }

    pub fn not_found_message(self) -> String {
        self.inflect("não encontrad")
    }

    pub fn created_message(self) -> String {
        format!("{} com sucesso", self.inflect("criad"))
    }

    pub fn updated_message(self) -> String {
        format!("{} com sucesso", self.inflect("atualizad"))
    }

    pub fn deleted_message(self) -> String {
        format!("{} com sucesso", self.inflect("deletad"))
    }
}
