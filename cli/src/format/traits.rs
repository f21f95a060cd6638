/// Renders a listing to a string in one output format
pub trait BookmarkFormat {
    fn to_string(&self) -> String;
}
