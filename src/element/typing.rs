use super::SceneElement;

/// Elements that accept single typed characters.
pub trait Typable: SceneElement {
    fn on_type(&mut self, ch: char);
}
