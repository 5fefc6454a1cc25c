use std::collections::HashMap;
use std::time::Instant;

use crate::config::{DefaultMode, HighlightConfig};
use crate::debounce::{DEFAULT_IDLE_MS, DebounceScheduler, RefreshScope};
use crate::error::HighlightError;
use crate::event::{Action, Event};
use crate::indexer::{self, MatchIndex, MatchIndexer, Overlays};
use crate::navigation;
use crate::panel;
use crate::pattern_set::{InsertMode, PatternSet, REMOVE_ALL_LABEL, escape_literal};
use crate::presentation::{Palette, PresentationMapper};
use crate::traits::Workspace;
use crate::types::{ChoiceItem, Command, CursorState, MatchFlags, SettingChange, ViewId};

const REGEXP_PROMPT: &str = "Enter expression";
const DEFAULT_OPTION: &str = "default";
const CAPTURE_OPTIONS: [&str; 3] = ["ignore case", "whole word", "both"];
const CHECK_MARK: &str = "✓";

fn flags_for_option(option: &str) -> Option<MatchFlags> {
    match option {
        DEFAULT_OPTION => Some(MatchFlags::empty()),
        "ignore case" => Some(MatchFlags::IGNORE_CASE),
        "whole word" => Some(MatchFlags::WHOLE_WORD),
        "both" => Some(MatchFlags::all()),
        _ => None,
    }
}

/// What to do with the answer of the prompt currently on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingPrompt {
    RegExpEntry,
    CaptureOptions { text: String },
    EditOptions { pattern: String },
    RemovePick,
    ModePick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Next,
    Previous,
}

/// Owner of all highlight state for one editor session.
///
/// Every handler takes `&mut self` and runs to completion, returning the
/// commands the host must apply.
#[derive(Debug)]
pub struct Session {
    patterns: PatternSet,
    overlays: Overlays,
    mode: DefaultMode,
    show_sidebar: bool,
    highlight_on_select: bool,
    indexer: MatchIndexer,
    presenter: PresentationMapper,
    indices: HashMap<ViewId, MatchIndex>,
    cursor: CursorState,
    debounce: DebounceScheduler,
    pending: Option<PendingPrompt>,
    deferred: Option<RefreshScope>,
}

#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub pattern_count: usize,
    pub mode: DefaultMode,
    pub cursor: CursorState,
    pub show_sidebar: bool,
    pub highlight_on_select: bool,
    pub prompt_open: bool,
    pub refresh_scheduled: bool,
}

pub struct SessionBuilder {
    config: HighlightConfig,
    idle_ms: u64,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            config: HighlightConfig::default(),
            idle_ms: DEFAULT_IDLE_MS,
        }
    }
}

impl SessionBuilder {
    pub fn config(mut self, config: HighlightConfig) -> Self {
        self.config = config;
        self
    }

    /// Idle window for coalescing edits.
    pub fn idle_ms(mut self, idle_ms: u64) -> Self {
        self.idle_ms = idle_ms;
        self
    }

    pub fn build(self) -> Session {
        Session {
            patterns: PatternSet::new(),
            overlays: Overlays::default(),
            mode: self.config.default_mode,
            show_sidebar: self.config.show_sidebar,
            highlight_on_select: self.config.highlight_on_select,
            indexer: MatchIndexer::new(),
            presenter: PresentationMapper::new(Palette::from_config(&self.config)),
            indices: HashMap::new(),
            cursor: CursorState::default(),
            debounce: DebounceScheduler::new(self.idle_ms),
            pending: None,
            deferred: None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        SessionBuilder::default().build()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> SessionBuilder {
        SessionBuilder::default()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            pattern_count: self.patterns.len(),
            mode: self.mode,
            cursor: self.cursor.clone(),
            show_sidebar: self.show_sidebar,
            highlight_on_select: self.highlight_on_select,
            prompt_open: self.pending.is_some(),
            refresh_scheduled: self.debounce.is_armed(),
        }
    }

    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn cursor(&self) -> &CursorState {
        &self.cursor
    }

    pub fn mode(&self) -> DefaultMode {
        self.mode
    }

    pub fn palette(&self) -> &Palette {
        self.presenter.palette()
    }

    /// The index computed by the last re-index of `view`.
    pub fn index(&self, view: ViewId) -> Option<&MatchIndex> {
        self.indices.get(&view)
    }

    /// When the host should call [`Session::tick`] next, if at all.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debounce.deadline()
    }

    pub fn panel_rows(&self) -> Vec<panel::PanelRow> {
        panel::rows(&self.patterns, &self.cursor)
    }

    /// Initial decorations and panel state, issued once at activation.
    pub fn start<W: Workspace>(&mut self, ws: &W) -> Vec<Command> {
        let mut commands = vec![Command::SetPanelVisible(self.show_sidebar)];
        commands.extend(self.refresh(ws, RefreshScope::AllVisible));
        commands
    }

    /// Run the debounced re-index if its idle window has elapsed.
    ///
    /// Held back while a prompt is open; the timer stays armed and fires on
    /// the first tick after the prompt closes.
    pub fn tick<W: Workspace>(&mut self, ws: &W, now: Instant) -> Vec<Command> {
        if self.pending.is_some() || !self.debounce.poll(now) {
            return vec![];
        }
        self.refresh(ws, RefreshScope::ActiveOnly)
    }

    pub fn handle_event<W: Workspace>(
        &mut self,
        ws: &W,
        now: Instant,
        event: Event,
    ) -> Vec<Command> {
        match event {
            Event::TextChanged(view) => {
                let focused = ws
                    .active_view()
                    .is_some_and(|active| ws.document_of(active) == ws.document_of(view));
                if focused {
                    self.debounce.arm(now);
                }
                vec![]
            }
            Event::ActiveViewChanged => self.refresh_or_defer(ws, RefreshScope::ActiveOnly),
            Event::VisibleViewsChanged => self.refresh_or_defer(ws, RefreshScope::AllVisible),
            Event::SelectionChanged(view) => {
                if !self.highlight_on_select || ws.active_view() != Some(view) {
                    return vec![];
                }
                if self.capture_overlays(ws, view) {
                    self.refresh_or_defer(ws, RefreshScope::AllVisible)
                } else {
                    vec![]
                }
            }
            Event::ConfigurationChanged(config) => {
                let mut commands = self.apply_config(&config);
                commands.extend(self.refresh_or_defer(ws, RefreshScope::AllVisible));
                commands
            }
            Event::Invoke(action) => self.invoke(ws, action),
            Event::PromptResolved(answer) => self.resolve_prompt(ws, answer),
        }
    }

    /// Re-index the views in `scope` and emit their full decoration sets.
    pub fn refresh<W: Workspace>(&mut self, ws: &W, scope: RefreshScope) -> Vec<Command> {
        if scope == RefreshScope::AllVisible || self.deferred == Some(scope) {
            self.deferred = None;
        }

        let views = ws.visible_views();
        let active_document = ws.active_view().map(|v| ws.document_of(v));
        if scope == RefreshScope::AllVisible {
            self.indices.retain(|view, _| views.contains(view));
        }

        let mut commands = Vec::new();
        for view in views {
            if scope == RefreshScope::ActiveOnly && Some(ws.document_of(view)) != active_document {
                continue;
            }
            let text = ws.document_text(view);
            let index = self.indexer.reindex(&text, &self.patterns, &self.overlays);
            let layout = self.presenter.layout(&index);
            for (slot, ranges) in layout.slots.iter().enumerate() {
                commands.push(Command::SetDecorations {
                    view,
                    slot,
                    ranges: ws.ranges_of(view, ranges),
                });
            }
            self.indices.insert(view, index);
        }
        commands.push(Command::RefreshPanel(self.panel_rows()));
        commands
    }

    fn refresh_or_defer<W: Workspace>(&mut self, ws: &W, scope: RefreshScope) -> Vec<Command> {
        if self.pending.is_none() {
            return self.refresh(ws, scope);
        }
        log::debug!("prompt open, deferring {scope:?} refresh");
        self.deferred = match (self.deferred, scope) {
            (Some(RefreshScope::AllVisible), _) | (_, RefreshScope::AllVisible) => {
                Some(RefreshScope::AllVisible)
            }
            _ => Some(RefreshScope::ActiveOnly),
        };
        vec![]
    }

    fn apply_config(&mut self, config: &HighlightConfig) -> Vec<Command> {
        self.mode = config.default_mode;
        self.presenter.set_palette(Palette::from_config(config));
        self.highlight_on_select = config.highlight_on_select;
        if !self.highlight_on_select {
            self.overlays.clear();
        }
        let mut commands = Vec::new();
        if self.show_sidebar != config.show_sidebar {
            self.show_sidebar = config.show_sidebar;
            commands.push(Command::SetPanelVisible(self.show_sidebar));
        }
        log::info!(
            "configuration applied: {} palette slots, mode {}",
            self.presenter.palette().len(),
            self.mode
        );
        commands
    }

    /// Text to capture: the selection, or the word under the caret.
    fn capture_text<W: Workspace>(&self, ws: &W) -> Result<String, HighlightError> {
        let view = ws.active_view().ok_or(HighlightError::EmptySelection)?;
        let selection = ws.selection(view);
        let text = ws.document_text(view);
        let captured = if selection.is_empty() {
            ws.word_range_at(view, selection.start)
                .and_then(|r| text.get(r.start..r.end))
        } else {
            text.get(selection.start..selection.end)
        };
        match captured {
            Some(s) if !s.is_empty() => Ok(s.to_string()),
            _ => Err(HighlightError::EmptySelection),
        }
    }

    /// Recompute the caret overlays of `view`. Returns whether they changed.
    fn capture_overlays<W: Workspace>(&mut self, ws: &W, view: ViewId) -> bool {
        let selection = ws.selection(view);
        let text = ws.document_text(view);
        let selected = text
            .get(selection.start..selection.end)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let word = selected.clone().or_else(|| {
            ws.word_range_at(view, selection.start)
                .and_then(|r| text.get(r.start..r.end))
                .map(str::to_string)
        });
        let overlays = Overlays {
            current_word: word,
            current_selection: selected,
        };
        if overlays == self.overlays {
            return false;
        }
        self.overlays = overlays;
        true
    }

    fn prompt(&mut self, prompt: PendingPrompt, command: Command) -> Vec<Command> {
        if let Some(previous) = self.pending.replace(prompt) {
            log::debug!("prompt {previous:?} superseded");
        }
        vec![command]
    }

    fn message(error: HighlightError) -> Vec<Command> {
        log::warn!("{error}");
        vec![Command::ShowMessage(error.to_string())]
    }

    /// Drop navigation state that points at a removed pattern, then redraw.
    fn patterns_changed<W: Workspace>(&mut self, ws: &W) -> Vec<Command> {
        if let Some(active) = &self.cursor.active_pattern
            && !self.patterns.contains(active)
        {
            self.cursor = CursorState::default();
        }
        self.refresh_or_defer(ws, RefreshScope::AllVisible)
    }

    fn invoke<W: Workspace>(&mut self, ws: &W, action: Action) -> Vec<Command> {
        log::debug!("action {action}");
        match action {
            Action::AddRegExpHighlight => self.prompt(
                PendingPrompt::RegExpEntry,
                Command::PromptInput {
                    prompt: REGEXP_PROMPT.to_string(),
                },
            ),
            Action::AddHighlight => match self.capture_text(ws) {
                Ok(text) => {
                    let outcome = self
                        .patterns
                        .add_literal(&text, self.mode.flags(), InsertMode::Toggle);
                    if outcome.changed() {
                        self.patterns_changed(ws)
                    } else {
                        vec![]
                    }
                }
                Err(e) => Self::message(e),
            },
            Action::AddHighlightWithOptions => match self.capture_text(ws) {
                Ok(text) => {
                    let pattern = escape_literal(&text);
                    if self.patterns.remove(&pattern) {
                        return self.patterns_changed(ws);
                    }
                    let items = CAPTURE_OPTIONS.into_iter().map(ChoiceItem::new).collect();
                    self.prompt(
                        PendingPrompt::CaptureOptions { text },
                        Command::PromptChoice { items },
                    )
                }
                Err(e) => Self::message(e),
            },
            Action::RemoveHighlight => {
                let items = self
                    .patterns
                    .iter()
                    .map(|spec| {
                        ChoiceItem::new(&spec.pattern).with_description(spec.flags.letters())
                    })
                    .chain(std::iter::once(ChoiceItem::new(REMOVE_ALL_LABEL)))
                    .collect();
                self.prompt(PendingPrompt::RemovePick, Command::PromptChoice { items })
            }
            Action::RemoveAllHighlights => {
                self.patterns.clear();
                self.patterns_changed(ws)
            }
            Action::SetHighlightMode => {
                let items = DefaultMode::ALL
                    .into_iter()
                    .map(|mode| {
                        let item = ChoiceItem::new(mode.label());
                        if mode == self.mode {
                            item.with_description(CHECK_MARK)
                        } else {
                            item
                        }
                    })
                    .collect();
                self.prompt(PendingPrompt::ModePick, Command::PromptChoice { items })
            }
            Action::ToggleSidebar => {
                self.show_sidebar = !self.show_sidebar;
                vec![
                    Command::SetPanelVisible(self.show_sidebar),
                    Command::UpdateSetting(SettingChange::ShowSidebar(self.show_sidebar)),
                ]
            }
            Action::ToggleHighlightOnSelect => {
                self.highlight_on_select = !self.highlight_on_select;
                if self.highlight_on_select {
                    if let Some(view) = ws.active_view() {
                        self.capture_overlays(ws, view);
                    }
                } else {
                    self.overlays.clear();
                }
                let mut commands = vec![Command::UpdateSetting(SettingChange::HighlightOnSelect(
                    self.highlight_on_select,
                ))];
                commands.extend(self.refresh_or_defer(ws, RefreshScope::AllVisible));
                commands
            }
            Action::FindNext(target) => self.navigate(ws, target, Direction::Next),
            Action::FindPrevious(target) => self.navigate(ws, target, Direction::Previous),
            Action::RemovePanelHighlight(pattern) => {
                if self.patterns.remove(&pattern) {
                    self.patterns_changed(ws)
                } else {
                    vec![]
                }
            }
            Action::EditPanelHighlight(pattern) => {
                if !self.patterns.contains(&pattern) {
                    return vec![];
                }
                let items = std::iter::once(DEFAULT_OPTION)
                    .chain(CAPTURE_OPTIONS)
                    .map(ChoiceItem::new)
                    .collect();
                self.prompt(
                    PendingPrompt::EditOptions { pattern },
                    Command::PromptChoice { items },
                )
            }
        }
    }

    fn resolve_prompt<W: Workspace>(&mut self, ws: &W, answer: Option<String>) -> Vec<Command> {
        let Some(pending) = self.pending.take() else {
            log::debug!("prompt answer with no prompt open");
            return vec![];
        };

        let mut commands = match answer.filter(|a| !a.is_empty()) {
            None => {
                log::debug!("prompt {pending:?} cancelled");
                vec![]
            }
            Some(answer) => self.continue_prompt(ws, pending, &answer),
        };

        if let Some(scope) = self.deferred {
            commands.extend(self.refresh(ws, scope));
        }
        commands
    }

    fn continue_prompt<W: Workspace>(
        &mut self,
        ws: &W,
        pending: PendingPrompt,
        answer: &str,
    ) -> Vec<Command> {
        match pending {
            PendingPrompt::RegExpEntry => match self.patterns.add_regexp(answer) {
                Ok(true) => self.patterns_changed(ws),
                Ok(false) => vec![],
                Err(e) => Self::message(e),
            },
            PendingPrompt::CaptureOptions { text } => match flags_for_option(answer) {
                Some(flags) => {
                    self.patterns.add_literal(&text, flags, InsertMode::Insert);
                    self.patterns_changed(ws)
                }
                None => vec![],
            },
            PendingPrompt::EditOptions { pattern } => match flags_for_option(answer) {
                Some(flags) if self.patterns.update_flags(&pattern, flags) => {
                    self.patterns_changed(ws)
                }
                _ => vec![],
            },
            PendingPrompt::RemovePick => {
                if self.patterns.remove(answer) {
                    self.patterns_changed(ws)
                } else {
                    vec![]
                }
            }
            PendingPrompt::ModePick => match DefaultMode::from_label(answer) {
                Some(mode) => {
                    log::info!("default mode set to {mode}");
                    self.mode = mode;
                    vec![Command::UpdateSetting(SettingChange::DefaultMode(mode))]
                }
                None => vec![],
            },
        }
    }

    fn navigate<W: Workspace>(
        &mut self,
        ws: &W,
        target: Option<String>,
        direction: Direction,
    ) -> Vec<Command> {
        let Some(view) = ws.active_view() else {
            return vec![];
        };
        let selection = ws.selection(view);
        let Some(pattern) = self.navigation_target(view, selection.start, target) else {
            return vec![];
        };
        let Some(spec) = self.patterns.get(&pattern) else {
            return vec![];
        };
        let regex = match indexer::compile(spec) {
            Ok(regex) => regex,
            Err(e) => return Self::message(e),
        };

        let text = ws.document_text(view);
        let hit = match direction {
            Direction::Next => navigation::find_next(&text, &regex, selection.start),
            Direction::Previous => navigation::find_previous(&text, &regex, selection.start),
        };

        let mut commands = Vec::new();
        match hit {
            Some(found) => {
                let indexed = self
                    .indices
                    .get(&view)
                    .and_then(|index| index.get(&pattern))
                    .map(|ranges| CursorState::locate(&pattern, ranges, found))
                    .filter(|state| state.index != 0);
                // A pending re-index leaves the stored ranges behind the text;
                // count against the live text without touching the index.
                self.cursor = indexed.unwrap_or_else(|| {
                    CursorState::locate(&pattern, &indexer::find_all(&text, &regex), found)
                });
                let range = ws.range_of(view, found);
                commands.push(Command::SetSelection { view, range });
                commands.push(Command::RevealRange { view, range });
            }
            None => {
                log::debug!("no occurrence of {pattern}");
                self.cursor = CursorState::not_found(&pattern);
            }
        }
        commands.push(Command::RefreshPanel(self.panel_rows()));
        commands
    }

    /// The explicitly named pattern, else the highlight under the caret,
    /// else the one navigated last, else the first one.
    fn navigation_target(
        &self,
        view: ViewId,
        caret: usize,
        target: Option<String>,
    ) -> Option<String> {
        if let Some(target) = target {
            return self.patterns.contains(&target).then_some(target);
        }
        self.indices
            .get(&view)
            .and_then(|index| index.pattern_at(caret))
            .map(str::to_string)
            .or_else(|| {
                self.cursor
                    .active_pattern
                    .clone()
                    .filter(|p| self.patterns.contains(p))
            })
            .or_else(|| self.patterns.iter().next().map(|s| s.pattern.clone()))
    }
}
