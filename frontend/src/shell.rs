use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use web_sys::Storage;

use insta_feed_core::{Effect, FeedConfig, FeedController};

use crate::dom::{self, BindError};
use crate::page::Page;
use crate::persisted;
use crate::timers::BrowserTimers;

/// Owns the controller together with the page it drives.
///
/// Listeners hold an `Rc<Shell>`; the shared timer callback holds a weak
/// reference. Borrows of the inner cells never outlive a single effect, so
/// events fired synchronously by a DOM mutation (`focus()`) can dispatch
/// again without tripping a `RefCell`.
pub struct Shell {
    pub controller: RefCell<FeedController>,
    pub page: RefCell<Page>,
    pub timers: RefCell<BrowserTimers>,
    pub storage: Option<Storage>,
}

impl Shell {
    pub fn new(config: FeedConfig) -> Result<Rc<Shell>, BindError> {
        let window = dom::window()?;
        let page = Page::locate(dom::document()?)?;
        let storage = persisted::get_local_storage();

        Ok(Rc::new_cyclic(|weak| Shell {
            controller: RefCell::new(FeedController::new(config)),
            page: RefCell::new(page),
            timers: RefCell::new(BrowserTimers::new(window, weak.clone())),
            storage,
        }))
    }

    pub fn dispatch<F>(self: &Rc<Self>, f: F)
    where
        F: FnOnce(&mut FeedController) -> Vec<Effect>,
    {
        let effects = f(&mut self.controller.borrow_mut());
        for effect in effects {
            debug!("apply {:?}", effect);
            self.apply(effect);
        }
    }

    pub fn timer_fired(self: &Rc<Self>, slot: u32) {
        let task = self.timers.borrow_mut().take_fired(slot);
        if let Some(task) = task {
            self.dispatch(|controller| controller.on_timer(task));
        }
    }

    pub fn theme_storage_key(&self) -> String {
        self.controller.borrow().config().theme_storage_key.clone()
    }
}
