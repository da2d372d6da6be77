//! Note operations.

use super::EditorModel;
use crate::core::{Note, Placement, Point, State};

/// Arguments of [`EditorModel::create_note`].
#[derive(Clone, Debug, PartialEq)]
pub struct CreateNoteParams {
    pub sm_id: String,
    pub id: Option<String>,
    pub text: String,
    pub placement: Placement,
    pub parent_id: Option<String>,
    pub font_size: Option<f64>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

impl CreateNoteParams {
    pub fn new(sm_id: impl Into<String>, text: impl Into<String>, placement: impl Into<Placement>) -> Self {
        Self {
            sm_id: sm_id.into(),
            id: None,
            text: text.into(),
            placement: placement.into(),
            parent_id: None,
            font_size: None,
            background_color: None,
            text_color: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_colors(mut self, background: impl Into<String>, text: impl Into<String>) -> Self {
        self.background_color = Some(background.into());
        self.text_color = Some(text.into());
        self
    }

    pub fn in_center(mut self) -> Self {
        if let Placement::TopLeft(point) = self.placement {
            self.placement = Placement::Center(point);
        }
        self
    }
}

impl EditorModel {
    pub fn create_note(&mut self, params: CreateNoteParams) -> Option<String> {
        if let Some(parent) = params.parent_id.as_deref() {
            if !self.contains::<State>(&params.sm_id, parent) {
                return None;
            }
        }
        let id = self.node_id(&params.sm_id, params.id)?;
        let note = Note {
            text: params.text,
            position: params.placement.resolve(self.config.note_dimensions()),
            parent_id: params.parent_id,
            font_size: params.font_size,
            background_color: params.background_color,
            text_color: params.text_color,
            selection: false,
        };
        self.insert(&params.sm_id, &id, note).then_some(id)
    }

    pub fn change_note_text(&mut self, sm_id: &str, id: &str, text: impl Into<String>) -> bool {
        let text = text.into();
        self.update(sm_id, id, |note: &mut Note| note.text = text)
    }

    pub fn change_note_background_color(&mut self, sm_id: &str, id: &str, color: Option<String>) -> bool {
        self.update(sm_id, id, |note: &mut Note| note.background_color = color)
    }

    pub fn change_note_text_color(&mut self, sm_id: &str, id: &str, color: Option<String>) -> bool {
        self.update(sm_id, id, |note: &mut Note| note.text_color = color)
    }

    pub fn change_note_font_size(&mut self, sm_id: &str, id: &str, font_size: Option<f64>) -> bool {
        self.update(sm_id, id, |note: &mut Note| note.font_size = font_size)
    }

    pub fn change_note_position(&mut self, sm_id: &str, id: &str, position: Point) -> bool {
        self.update(sm_id, id, |note: &mut Note| note.position = position)
    }

    pub fn change_note_selection(&mut self, sm_id: &str, id: &str, selection: bool) -> bool {
        self.select(sm_id, id, |_: &Note| true, |note| note.selection = selection)
    }

    /// Attach a note to a state.
    pub fn link_note(&mut self, sm_id: &str, parent_id: &str, id: &str) -> bool {
        if !self.contains::<State>(sm_id, parent_id) {
            return false;
        }
        let parent = parent_id.to_string();
        self.update(sm_id, id, |note: &mut Note| note.parent_id = Some(parent))
    }

    pub fn unlink_note(&mut self, sm_id: &str, id: &str) -> bool {
        self.update_if(
            sm_id,
            id,
            |note: &Note| note.parent_id.is_some(),
            |note| note.parent_id = None,
        )
    }

    pub fn delete_note(&mut self, sm_id: &str, id: &str) -> bool {
        self.remove::<Note>(sm_id, id)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{model, SM};
    use super::*;
    use crate::core::Dimensions;
    use crate::editor::CreateStateParams;

    fn note(model: &EditorModel, id: &str) -> Note {
        model.document().notes(SM).unwrap()[id].clone()
    }

    #[test]
    fn centered_note_uses_note_box() {
        let mut model = model();
        let id = model
            .create_note(CreateNoteParams::new(SM, "hi", Point::new(200.0, 100.0)).in_center())
            .unwrap();

        assert_eq!(note(&model, &id).position, Point::new(100.0, 82.0));
    }

    #[test]
    fn field_setters() {
        let mut model = model();
        let id = model
            .create_note(
                CreateNoteParams::new(SM, "hi", Point::default())
                    .with_font_size(14.0)
                    .with_colors("#fff", "#000"),
            )
            .unwrap();

        assert!(model.change_note_text(SM, &id, "bye"));
        assert!(model.change_note_background_color(SM, &id, None));
        assert!(model.change_note_text_color(SM, &id, Some("#123".into())));
        assert!(model.change_note_font_size(SM, &id, Some(20.0)));
        assert!(model.change_note_position(SM, &id, Point::new(1.0, 1.0)));

        let n = note(&model, &id);
        assert_eq!(n.text, "bye");
        assert_eq!(n.background_color, None);
        assert_eq!(n.text_color.as_deref(), Some("#123"));
        assert_eq!(n.font_size, Some(20.0));
        assert_eq!(n.position, Point::new(1.0, 1.0));
    }

    #[test]
    fn selection_is_not_a_content_change() {
        let mut model = model();
        let id = model
            .create_note(CreateNoteParams::new(SM, "hi", Point::default()))
            .unwrap();
        model.trigger_save(None, None);

        assert!(model.change_note_selection(SM, &id, true));
        assert!(note(&model, &id).selection);
        assert!(!model.document().is_stale());
    }

    #[test]
    fn link_unlink_delete() {
        let mut model = model();
        let parent = model
            .create_state(CreateStateParams::new(SM, "S", Point::default(), Dimensions::square(1.0)))
            .unwrap();
        let id = model
            .create_note(CreateNoteParams::new(SM, "hi", Point::default()))
            .unwrap();

        assert!(!model.unlink_note(SM, &id));
        assert!(!model.link_note(SM, "ghost", &id));
        assert!(model.link_note(SM, &parent, &id));
        assert_eq!(note(&model, &id).parent_id.as_deref(), Some(parent.as_str()));
        assert!(model.unlink_note(SM, &id));

        assert!(model.delete_note(SM, &id));
        assert!(!model.delete_note(SM, &id));
        assert!(!model.change_note_text(SM, &id, "x"));
    }
}
