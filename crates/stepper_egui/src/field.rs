//! The stepper widget: a single-line numeric text box followed by `−` and `+`
//! buttons.
//!
//! The widget keeps only presentation state (caret, selection, focus edge
//! detection, button timers). The text itself lives in the
//! [`Stepper`], and every edit is routed through
//! [`Stepper::on_keystroke`] so the validator decides what the field may
//! contain.

use crate::repeat::{RepeatSignal, RepeatTimer};
use egui::{
    Align2, Event, EventFilter, Id, Key, Modifiers, Pos2, Rect, Response, Sense, StrokeKind,
    TextStyle, Ui, Vec2,
};
use std::hash::Hash;
use stepper_core::{
    Direction, EditRange, ErrorKind, KeystrokeOutcome, Phase, RepeatConfig, StepValidator,
    Stepper, clamp_to_char_boundary, next_cursor_boundary, prev_cursor_boundary,
};

const DEFAULT_WIDTH: f32 = 140.0;
const TEXT_PADDING: f32 = 4.0;

/// What happened to a [`StepperField`] during one frame.
pub struct StepperResponse {
    /// The text part of the field.
    pub response: Response,
    pub down: Response,
    pub up: Response,
    /// The field text differs from the start of the frame.
    pub changed: bool,
    /// The last error the stepper reported this frame.
    pub error: Option<ErrorKind>,
}

/// egui front end for a [`Stepper`].
///
/// The field is identified by a global [`Id`] built from the salt passed to
/// [`StepperField::new`], so the salt must be unique within the context.
#[derive(Clone, Debug)]
pub struct StepperField {
    id: Id,
    width: f32,
    caret: usize,
    /// Other end of the selection; `None` when nothing is selected.
    selection_anchor: Option<usize>,
    had_focus: bool,
    down: RepeatTimer,
    up: RepeatTimer,
}

impl StepperField {
    pub fn new(id_salt: impl Hash) -> Self {
        Self::with_repeat(id_salt, RepeatConfig::default())
    }

    pub fn with_repeat(id_salt: impl Hash, repeat: RepeatConfig) -> Self {
        Self {
            id: Id::new(id_salt),
            width: DEFAULT_WIDTH,
            caret: 0,
            selection_anchor: None,
            had_focus: false,
            down: RepeatTimer::new(repeat),
            up: RepeatTimer::new(repeat),
        }
    }

    /// Total width including both buttons.
    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Focus id of the text part.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Caret position as a byte offset into the stepper text.
    #[inline]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// The selected byte range; empty (at the caret) when nothing is selected.
    pub fn selection(&self) -> EditRange {
        EditRange::new(self.selection_anchor.unwrap_or(self.caret), self.caret)
    }

    pub fn show<V: StepValidator>(
        &mut self,
        ui: &mut Ui,
        stepper: &mut Stepper<V>,
    ) -> StepperResponse {
        let before = stepper.text().to_owned();
        let mut error = None;

        let height = ui.spacing().interact_size.y;
        let (rect, _) = ui.allocate_exact_size(Vec2::new(self.width, height), Sense::hover());
        let button_w = height.min(rect.width() / 3.0);
        let up_rect = Rect::from_min_max(Pos2::new(rect.max.x - button_w, rect.min.y), rect.max);
        let down_rect = up_rect.translate(Vec2::new(-button_w, 0.0));
        let text_rect = Rect::from_min_max(rect.min, Pos2::new(down_rect.min.x, rect.max.y));

        let response = ui.interact(text_rect, self.id, Sense::click());
        // Drag sense keeps a long press registered once it stops counting as a click.
        let down = ui.interact(down_rect, self.id.with("down"), Sense::click_and_drag());
        let up = ui.interact(up_rect, self.id.with("up"), Sense::click_and_drag());

        if response.clicked() {
            ui.memory_mut(|mem| mem.request_focus(self.id));
        } else if ui.input(|i| i.pointer.any_click()) && !ui.rect_contains_pointer(rect) {
            ui.memory_mut(|mem| mem.surrender_focus(self.id));
        }

        // --- focus edges drive the editing phase
        let has_focus = ui.memory(|mem| mem.has_focus(self.id));
        if has_focus != self.had_focus {
            if has_focus {
                log::debug!(target: "stepper.egui", "{:?} focused", self.id);
                stepper.on_edit_begin();
                self.move_caret(stepper.text().len(), false);
            } else {
                log::debug!(target: "stepper.egui", "{:?} blurred", self.id);
                error = stepper.on_edit_end().or(error);
                self.selection_anchor = None;
            }
            self.had_focus = has_focus;
        }

        if has_focus {
            ui.memory_mut(|mem| {
                mem.set_focus_lock_filter(
                    self.id,
                    EventFilter {
                        tab: false,
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        escape: false,
                    },
                );
            });

            // Observers may call back into the context, so no input lock is
            // held while the stepper runs.
            let events = ui.input(|i| i.events.clone());
            for event in &events {
                error = self.handle_event(event, stepper).or(error);
            }
        }

        // --- step buttons
        let typed = stepper.text().to_owned();
        let now = ui.input(|i| i.time);
        let down_pressed = down.is_pointer_button_down_on();
        let up_pressed = up.is_pointer_button_down_on();
        error = self
            .drive_button(Direction::Down, down_pressed, now, stepper)
            .or(error);
        error = self
            .drive_button(Direction::Up, up_pressed, now, stepper)
            .or(error);
        if stepper.text() != typed {
            self.move_caret(stepper.text().len(), false);
        }
        self.clamp_caret(stepper.text());

        self.paint(ui, stepper, &response, &down, &up, has_focus);

        let changed = stepper.text() != before;
        if changed || error.is_some() {
            ui.ctx().request_repaint();
        }
        if let Some(wait) = [self.down, self.up]
            .iter()
            .filter_map(|timer| timer.time_until_next(now))
            .min()
        {
            ui.ctx().request_repaint_after(wait);
        }

        StepperResponse {
            response,
            down,
            up,
            changed,
            error,
        }
    }

    // --- input

    fn handle_event<V: StepValidator>(
        &mut self,
        event: &Event,
        stepper: &mut Stepper<V>,
    ) -> Option<ErrorKind> {
        match event {
            Event::Text(text) | Event::Paste(text) => {
                self.replace(stepper, self.selection(), text)
            }
            Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => self.handle_key(*key, *modifiers, stepper),
            _ => None,
        }
    }

    fn handle_key<V: StepValidator>(
        &mut self,
        key: Key,
        modifiers: Modifiers,
        stepper: &mut Stepper<V>,
    ) -> Option<ErrorKind> {
        log::trace!(target: "stepper.egui", "key {key:?}");
        let selection = self.selection();

        match key {
            Key::Enter => stepper.on_edit_end(),
            Key::Backspace => {
                let range = if selection.is_empty() {
                    EditRange::new(prev_cursor_boundary(stepper.text(), self.caret), self.caret)
                } else {
                    selection
                };
                if range.is_empty() {
                    return None;
                }
                self.replace(stepper, range, "")
            }
            Key::Delete => {
                let range = if selection.is_empty() {
                    EditRange::new(self.caret, next_cursor_boundary(stepper.text(), self.caret))
                } else {
                    selection
                };
                if range.is_empty() {
                    return None;
                }
                self.replace(stepper, range, "")
            }
            Key::ArrowLeft => {
                let to = if selection.is_empty() || modifiers.shift {
                    prev_cursor_boundary(stepper.text(), self.caret)
                } else {
                    selection.start
                };
                self.move_caret(to, modifiers.shift);
                None
            }
            Key::ArrowRight => {
                let to = if selection.is_empty() || modifiers.shift {
                    next_cursor_boundary(stepper.text(), self.caret)
                } else {
                    selection.end
                };
                self.move_caret(to, modifiers.shift);
                None
            }
            Key::Home => {
                self.move_caret(0, modifiers.shift);
                None
            }
            Key::End => {
                self.move_caret(stepper.text().len(), modifiers.shift);
                None
            }
            Key::A if modifiers.command => {
                self.selection_anchor = Some(0);
                self.caret = stepper.text().len();
                None
            }
            Key::ArrowUp => {
                let error = stepper.on_step_up_begin();
                stepper.on_step_up_end();
                error
            }
            Key::ArrowDown => {
                let error = stepper.on_step_down_begin();
                stepper.on_step_down_end();
                error
            }
            _ => None,
        }
    }

    fn replace<V: StepValidator>(
        &mut self,
        stepper: &mut Stepper<V>,
        range: EditRange,
        replacement: &str,
    ) -> Option<ErrorKind> {
        match stepper.on_keystroke(range, replacement) {
            KeystrokeOutcome::Accepted => {
                let start = clamp_to_char_boundary(stepper.text(), range.start);
                self.move_caret(start + replacement.len(), false);
                None
            }
            KeystrokeOutcome::Rewritten(text) => {
                self.move_caret(text.len(), false);
                None
            }
            KeystrokeOutcome::Rejected(kind) => Some(kind),
        }
    }

    /// Feed one button's pointer state through its repeat timer.
    fn drive_button<V: StepValidator>(
        &mut self,
        direction: Direction,
        pressed: bool,
        now: f64,
        stepper: &mut Stepper<V>,
    ) -> Option<ErrorKind> {
        let (timer, enabled) = match direction {
            Direction::Down => (&mut self.down, stepper.can_step_down()),
            Direction::Up => (&mut self.up, stepper.can_step_up()),
        };

        // A correction or a keystroke may have ended the action while the
        // button is still down.
        if timer.is_running() && stepper.phase() != Phase::Ticking(direction) {
            timer.cancel();
        }

        // A disabled button cannot start an action, but one already running
        // continues until the stepper ends it.
        let held = pressed && (enabled || timer.is_pressed());
        let error = match timer.poll(now, held) {
            RepeatSignal::Idle => None,
            RepeatSignal::Begin => stepper.begin_step(direction),
            RepeatSignal::Tick => stepper.tick_step(direction),
            RepeatSignal::End => {
                stepper.end_step(direction);
                None
            }
        };

        if timer.is_running() && stepper.phase() != Phase::Ticking(direction) {
            log::debug!(target: "stepper.egui", "{direction:?} repeat cancelled");
            timer.cancel();
        }
        error
    }

    // --- caret

    fn move_caret(&mut self, to: usize, extend: bool) {
        if extend {
            self.selection_anchor.get_or_insert(self.caret);
        } else {
            self.selection_anchor = None;
        }
        self.caret = to;
        if self.selection_anchor == Some(self.caret) {
            self.selection_anchor = None;
        }
    }

    fn clamp_caret(&mut self, text: &str) {
        self.caret = clamp_to_char_boundary(text, self.caret);
        self.selection_anchor = self
            .selection_anchor
            .map(|anchor| clamp_to_char_boundary(text, anchor))
            .filter(|&anchor| anchor != self.caret);
    }

    // --- paint

    fn paint<V: StepValidator>(
        &self,
        ui: &Ui,
        stepper: &Stepper<V>,
        response: &Response,
        down: &Response,
        up: &Response,
        has_focus: bool,
    ) {
        let painter = ui.painter();
        let visuals = ui.visuals();
        let text_rect = response.rect;

        let stroke = if has_focus {
            visuals.selection.stroke
        } else {
            ui.style().interact(response).bg_stroke
        };
        painter.rect_filled(text_rect, 2.0, visuals.extreme_bg_color);
        painter.rect_stroke(text_rect, 2.0, stroke, StrokeKind::Inside);

        let text = stepper.text();
        let font_id = TextStyle::Body.resolve(ui.style());
        let text_color = visuals.text_color();
        let origin = Pos2::new(text_rect.min.x + TEXT_PADDING, text_rect.center().y);
        let x_at = |index: usize| -> f32 {
            let prefix = text[..clamp_to_char_boundary(text, index)].to_owned();
            ui.fonts(|f| f.layout_no_wrap(prefix, font_id.clone(), text_color))
                .size()
                .x
        };

        let clip_painter = painter.with_clip_rect(text_rect.shrink(1.0));
        if has_focus {
            let selection = self.selection();
            if !selection.is_empty() {
                let sel_rect = Rect::from_min_max(
                    Pos2::new(origin.x + x_at(selection.start), text_rect.min.y + 2.0),
                    Pos2::new(origin.x + x_at(selection.end), text_rect.max.y - 2.0),
                );
                clip_painter.rect_filled(sel_rect, 0.0, visuals.selection.bg_fill);
            }
        }

        clip_painter.text(
            origin,
            Align2::LEFT_CENTER,
            text,
            font_id.clone(),
            text_color,
        );

        if has_focus {
            let caret_x = (origin.x + x_at(self.caret)).round();
            let caret_rect = Rect::from_min_size(
                Pos2::new(caret_x, text_rect.min.y + 3.0),
                Vec2::new(1.0, (text_rect.height() - 6.0).max(1.0)),
            );
            clip_painter.rect_filled(caret_rect, 0.0, text_color);
        }

        paint_button(ui, down, "−", stepper.can_step_down());
        paint_button(ui, up, "+", stepper.can_step_up());
    }
}

fn paint_button(ui: &Ui, response: &Response, label: &str, enabled: bool) {
    let visuals = if enabled {
        ui.style().interact(response)
    } else {
        &ui.visuals().widgets.noninteractive
    };
    let text_color = if enabled {
        visuals.text_color()
    } else {
        ui.visuals().weak_text_color()
    };

    let painter = ui.painter();
    painter.rect_filled(response.rect, 2.0, visuals.weak_bg_fill);
    painter.rect_stroke(response.rect, 2.0, visuals.bg_stroke, StrokeKind::Inside);
    painter.text(
        response.rect.center(),
        Align2::CENTER_CENTER,
        label,
        TextStyle::Button.resolve(ui.style()),
        text_color,
    );
}
