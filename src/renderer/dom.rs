//! Browser board and HUD
//!
//! Sprites are rebuilt when a new round starts and only repositioned on
//! other frames. Clicks are queued and handed to the game by the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, HtmlElement, HtmlImageElement, MouseEvent};

use super::{css_px, needs_placeholder, target_label};
use crate::platform::Hud;
use crate::sim::Round;
use crate::sprites::SpriteSource;

/// `(round_id, entity_index)` pairs clicked since the last frame
pub type ClickQueue = Rc<RefCell<Vec<(u64, usize)>>>;

/// How long the overlay stays up (ms)
const OVERLAY_MS: i32 = 2000;

struct Sprite {
    img: HtmlImageElement,
    on_click: Closure<dyn FnMut(MouseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

impl Sprite {
    /// Unhook listeners before the closures are dropped; a detached image can
    /// still finish loading and fire `error`.
    fn detach(&self) {
        let _ = self
            .img
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
        self.img.set_onerror(None);
        self.img.remove();
    }
}

/// The playfield element holding one `<img>` per entity
pub struct SpriteBoard {
    document: Document,
    board: HtmlElement,
    sprites: Vec<Sprite>,
    round_id: Option<u64>,
    clicks: ClickQueue,
}

impl SpriteBoard {
    pub fn new(document: &Document, board_id: &str, clicks: ClickQueue) -> Result<Self, JsValue> {
        let board: HtmlElement = document
            .get_element_by_id(board_id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{} element", board_id)))?
            .dyn_into()?;
        board.style().set_property("position", "relative")?;

        Ok(Self {
            document: document.clone(),
            board,
            sprites: Vec::new(),
            round_id: None,
            clicks,
        })
    }

    /// Board size in CSS pixels
    pub fn size(&self) -> (f32, f32) {
        let rect = self.board.get_bounding_client_rect();
        (rect.width() as f32, rect.height() as f32)
    }

    /// Bring the DOM in line with `round`
    pub fn sync(&mut self, round: &Round, sprites: &SpriteSource, size: f32) -> Result<(), JsValue> {
        if self.round_id != Some(round.id) {
            self.rebuild(round, sprites, size)?;
        }

        for (sprite, entity) in self.sprites.iter().zip(&round.entities) {
            let style = sprite.img.style();
            style.set_property("left", &css_px(entity.pos.x))?;
            style.set_property("top", &css_px(entity.pos.y))?;
        }
        Ok(())
    }

    fn rebuild(&mut self, round: &Round, sprites: &SpriteSource, size: f32) -> Result<(), JsValue> {
        for sprite in self.sprites.drain(..) {
            sprite.detach();
        }
        self.board.set_inner_html("");

        for (index, entity) in round.entities.iter().enumerate() {
            let img: HtmlImageElement = self.document.create_element("img")?.dyn_into()?;
            let style = img.style();
            style.set_property("position", "absolute")?;
            style.set_property("width", &css_px(size))?;
            style.set_property("height", &css_px(size))?;
            img.set_alt(&entity.identity);
            img.set_draggable(false);

            let clicks = self.clicks.clone();
            let round_id = round.id;
            let on_click = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                clicks.borrow_mut().push((round_id, index));
            });
            img.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;

            let placeholder = sprites.placeholder_url();
            let fallback = img.clone();
            let on_error = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                let src = fallback.get_attribute("src");
                if needs_placeholder(src.as_deref(), &placeholder) {
                    log::warn!("Sprite '{}' failed to load, using placeholder", fallback.alt());
                    fallback.set_src(&placeholder);
                } else {
                    log::warn!("Placeholder '{}' failed to load", placeholder);
                }
                // At most one swap per image
                fallback.set_onerror(None);
            });
            img.set_onerror(Some(on_error.as_ref().unchecked_ref()));

            img.set_src(&sprites.url(&entity.identity));
            self.board.append_child(&img)?;

            self.sprites.push(Sprite {
                img,
                on_click,
                _on_error: on_error,
            });
        }

        self.round_id = Some(round.id);
        Ok(())
    }
}

/// HUD backed by elements looked up by id
pub struct DomHud {
    document: Document,
}

impl DomHud {
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(&self, id: &str, class: &str, on: bool) {
        if let Some(el) = self.document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    /// Hide the overlay after `OVERLAY_MS`
    fn schedule_overlay_hide(&self) {
        let Some(window) = web_sys::window() else { return };
        let document = self.document.clone();
        let hide = Closure::once_into_js(move || {
            if let Some(el) = document.get_element_by_id("celebration") {
                if let Ok(el) = el.dyn_into::<HtmlElement>() {
                    let _ = el.style().set_property("display", "none");
                }
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            hide.unchecked_ref(),
            OVERLAY_MS,
        );
    }
}

impl Hud for DomHud {
    fn set_score(&mut self, score: u64) {
        self.set_text("score", &format!("Score: {}", score));
    }

    fn set_level(&mut self, level: u32) {
        self.set_text("level", &format!("Level: {}", level));
    }

    fn set_high_level(&mut self, level: u32) {
        self.set_text("highlevel", &format!("Highest Level: {}", level));
    }

    fn set_target(&mut self, target: &str) {
        self.set_text("target", &target_label(target));
    }

    fn set_timer_text(&mut self, text: &str) {
        self.set_text("level-timer", text);
    }

    fn celebrate(&mut self, message: &str) {
        let Some(el) = self.document.get_element_by_id("celebration") else {
            log::info!("{}", message);
            return;
        };
        el.set_text_content(Some(message));
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            let _ = el.style().set_property("display", "flex");
        }
        self.schedule_overlay_hide();
    }

    fn set_cursed(&mut self, cursed: bool) {
        self.set_class("game-board", "cursed", cursed);
        self.set_class("target", "cursed", cursed);
    }
}
