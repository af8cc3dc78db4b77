/// Entity kinds that receive generated identifiers. Each kind has its own
/// prefix so ids never collide across collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdKind {
    User,
    Family,
    Category,
    Product,
    ShoppingList,
    ListItem,
}

impl IdKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            IdKind::User => "u_",
            IdKind::Family => "f_",
            IdKind::Category => "c_",
            IdKind::Product => "p_",
            IdKind::ShoppingList => "sl_",
            IdKind::ListItem => "i_",
        }
    }
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self, kind: IdKind) -> String;
}
