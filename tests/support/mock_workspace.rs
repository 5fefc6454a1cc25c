#![allow(dead_code)]

use std::collections::BTreeMap;

use highlight_words::Workspace;
use highlight_words::types::{DocumentId, Selection, ViewId};
use ropey::Rope;

pub struct MockView {
    document: DocumentId,
    selection: Selection,
}

/// Views over rope-backed documents. View `n` shows document `n` unless
/// opened with [`MockWorkspace::split`].
pub struct MockWorkspace {
    documents: BTreeMap<DocumentId, Rope>,
    views: BTreeMap<ViewId, MockView>,
    active: Option<ViewId>,
}

impl MockWorkspace {
    /// One view (id 1) showing `text`, focused, caret at 0.
    pub fn new(text: &str) -> Self {
        let mut ws = Self {
            documents: BTreeMap::new(),
            views: BTreeMap::new(),
            active: None,
        };
        ws.open(1, text);
        ws.focus(1);
        ws
    }

    pub fn open(&mut self, view: ViewId, text: &str) {
        self.documents.insert(view, Rope::from_str(text));
        self.views.insert(
            view,
            MockView {
                document: view,
                selection: Selection::default(),
            },
        );
    }

    /// Open `view` on the document already shown by `of`.
    pub fn split(&mut self, of: ViewId, view: ViewId) {
        let document = self.views[&of].document;
        self.views.insert(
            view,
            MockView {
                document,
                selection: Selection::default(),
            },
        );
    }

    pub fn close(&mut self, view: ViewId) {
        self.views.remove(&view);
        if self.active == Some(view) {
            self.active = self.views.keys().next().copied();
        }
    }

    pub fn focus(&mut self, view: ViewId) {
        self.active = Some(view);
    }

    pub fn select(&mut self, view: ViewId, start: usize, end: usize) {
        if let Some(v) = self.views.get_mut(&view) {
            v.selection = Selection { start, end };
        }
    }

    pub fn caret(&mut self, view: ViewId, offset: usize) {
        self.select(view, offset, offset);
    }

    /// Insert at a char index of the document shown in `view`.
    pub fn insert(&mut self, view: ViewId, char_idx: usize, text: &str) {
        let document = self.views[&view].document;
        if let Some(rope) = self.documents.get_mut(&document) {
            rope.insert(char_idx, text);
        }
    }
}

impl Workspace for MockWorkspace {
    fn visible_views(&self) -> Vec<ViewId> {
        self.views.keys().copied().collect()
    }

    fn active_view(&self) -> Option<ViewId> {
        self.active
    }

    fn document_of(&self, view: ViewId) -> DocumentId {
        self.views.get(&view).map_or(view, |v| v.document)
    }

    fn document_text(&self, view: ViewId) -> String {
        self.documents
            .get(&self.document_of(view))
            .map(|rope| rope.to_string())
            .unwrap_or_default()
    }

    fn selection(&self, view: ViewId) -> Selection {
        self.views
            .get(&view)
            .map(|v| v.selection)
            .unwrap_or_default()
    }
}
