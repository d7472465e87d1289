//! GrandHub counters entry point
//!
//! Mounts the landing page behaviours in the browser. The native build runs
//! a short simulated demo instead.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_landing {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
        IntersectionObserverInit, MutationObserver, MutationObserverInit, PageTransitionEvent,
        PointerEvent, ScrollBehavior, ScrollToOptions, Window,
    };

    use grandhub_counters::anim::{AnimatedCounter, CounterProps, Intersection};
    use grandhub_counters::persistence::{NullStore, PersistentCounterStore};
    use grandhub_counters::platform::{self, storage::LocalStore};
    use grandhub_counters::settings::Settings;
    use grandhub_counters::ui::{GlowPosition, Rect, ScrollTop, glow_position};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    type IntersectCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;
    type FrameCallback = Closure<dyn FnMut(f64)>;

    /// One mounted `[data-count-up]` element
    struct CounterMount {
        counter: AnimatedCounter,
        element: Element,
        observer: Option<IntersectionObserver>,
        frame_id: Option<i32>,
        reduced_motion: bool,
        // Callbacks live exactly as long as the mount and only hold a weak
        // handle back to it
        _on_intersect: Option<IntersectCallback>,
        on_frame: Option<FrameCallback>,
    }

    impl CounterMount {
        fn show(&self) {
            self.element.set_text_content(Some(&self.counter.text()));
        }
    }

    type SharedMount = Rc<RefCell<CounterMount>>;
    type Mounts = Rc<RefCell<Vec<SharedMount>>>;

    fn mount_counter(element: Element, settings: &Settings) -> Option<SharedMount> {
        let attr = |name: &str| element.get_attribute(name);
        let props = CounterProps::from_attrs(
            attr("data-count-up").as_deref(),
            attr("data-prefix").as_deref(),
            attr("data-suffix").as_deref(),
            attr("data-duration").as_deref(),
            attr("data-group").as_deref(),
            settings.animation.duration_ms,
        );
        let props = match props {
            Ok(props) => props,
            Err(e) => {
                log::warn!("Skipping counter: {}", e);
                return None;
            }
        };

        let threshold = settings.animation.visibility_threshold;
        let mount = Rc::new(RefCell::new(CounterMount {
            counter: AnimatedCounter::new(props, threshold),
            element: element.clone(),
            observer: None,
            frame_id: None,
            reduced_motion: !settings.effective_animation(),
            _on_intersect: None,
            on_frame: None,
        }));
        mount.borrow().show();

        {
            let weak = Rc::downgrade(&mount);
            let on_frame: FrameCallback = Closure::new(move |time: f64| {
                if let Some(mount) = weak.upgrade() {
                    advance_frame(&mount, time);
                }
            });
            mount.borrow_mut().on_frame = Some(on_frame);
        }

        let weak = Rc::downgrade(&mount);
        let on_intersect: IntersectCallback = Closure::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let Some(mount) = weak.upgrade() else {
                    return;
                };
                let mut started = false;
                {
                    let mut m = mount.borrow_mut();
                    for entry in entries.iter() {
                        let entry: IntersectionObserverEntry = entry.unchecked_into();
                        let report =
                            Intersection::new(entry.intersection_ratio(), entry.is_intersecting());
                        started |= m.counter.on_intersection(report);
                    }
                    if !m.counter.gate().is_observing() {
                        observer.disconnect();
                        m.observer = None;
                    }
                }
                if started {
                    start_run(&mount);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        match IntersectionObserver::new_with_options(on_intersect.as_ref().unchecked_ref(), &init)
        {
            Ok(observer) => {
                observer.observe(&element);
                let mut m = mount.borrow_mut();
                m.observer = Some(observer);
                m._on_intersect = Some(on_intersect);
            }
            Err(e) => {
                log::warn!("IntersectionObserver unavailable ({:?}), counter stays at 0", e);
            }
        }

        Some(mount)
    }

    fn start_run(mount: &SharedMount) {
        if mount.borrow().reduced_motion {
            finish_now(mount);
        } else {
            request_frame(mount);
        }
    }

    fn finish_now(mount: &SharedMount) {
        let mut m = mount.borrow_mut();
        if m.counter.finish_now().is_some() {
            m.show();
        }
    }

    fn request_frame(mount: &SharedMount) {
        let requested = {
            let m = mount.borrow();
            match (web_sys::window(), m.on_frame.as_ref()) {
                (Some(window), Some(callback)) => window
                    .request_animation_frame(callback.as_ref().unchecked_ref())
                    .map_err(|e| format!("{:?}", e)),
                (None, _) => Err("no window".to_string()),
                // Released mount, nothing left to animate
                (_, None) => return,
            }
        };
        match requested {
            Ok(id) => mount.borrow_mut().frame_id = Some(id),
            Err(e) => {
                log::warn!("requestAnimationFrame failed ({}), jumping to value", e);
                finish_now(mount);
            }
        }
    }

    fn advance_frame(mount: &SharedMount, time: f64) {
        let more = {
            let mut m = mount.borrow_mut();
            m.frame_id = None;
            match m.counter.on_frame(time) {
                Some(frame) => {
                    m.show();
                    frame.more
                }
                None => false,
            }
        };
        if more {
            request_frame(mount);
        }
    }

    /// Cancel the pending frame, disconnect the observer and drop both
    /// callbacks. Never called from inside either callback.
    fn release(mount: &SharedMount) {
        let mut m = mount.borrow_mut();
        if let Some(id) = m.frame_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        if let Some(observer) = m.observer.take() {
            observer.disconnect();
        }
        m._on_intersect = None;
        m.on_frame = None;
    }

    fn element_removed(mount: &SharedMount) {
        if mount.borrow_mut().counter.unmount() {
            log::debug!("Counter removed before finishing");
        }
        release(mount);
    }

    fn page_hidden(mount: &SharedMount, persisted: bool) {
        let torn_down = mount.borrow_mut().counter.on_page_hide(persisted);
        if torn_down {
            release(mount);
        }
    }

    /// Unmount counters whose element leaves the document
    fn watch_removals(document: &Document, mounts: Mounts) {
        let Some(body) = document.body() else {
            return;
        };
        let closure = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                mounts.borrow_mut().retain(|mount| {
                    let connected = mount.borrow().element.is_connected();
                    if !connected {
                        element_removed(mount);
                    }
                    connected
                });
            },
        );
        match MutationObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(observer) => {
                let init = MutationObserverInit::new();
                init.set_child_list(true);
                init.set_subtree(true);
                if let Err(e) = observer.observe_with_options(&body, &init) {
                    log::warn!("Could not watch for removed counters: {:?}", e);
                    return;
                }
                closure.forget();
            }
            Err(e) => {
                log::warn!("MutationObserver unavailable ({:?}), removed counters stay mounted", e);
            }
        }
    }

    fn mount_social_proof(document: &Document, settings: &Settings) {
        let Some(el) = document.query_selector("[data-social-proof]").ok().flatten() else {
            return;
        };
        let rng = Pcg32::seed_from_u64(platform::rng_seed());
        let value = match LocalStore::open() {
            Some(store) => PersistentCounterStore::new(store, rng).bump(&settings.social_proof),
            None => {
                log::warn!("localStorage unavailable, social proof will not persist");
                PersistentCounterStore::new(NullStore, rng).bump(&settings.social_proof)
            }
        };
        el.set_text_content(Some(&value.to_string()));
        log::info!("Social proof count: {}", value);
    }

    fn mount_scroll_top(window: &Window, document: &Document, settings: &Settings) {
        let Some(button) = document.get_element_by_id("scroll-top") else {
            return;
        };

        {
            let state = RefCell::new(ScrollTop::new(settings.scroll_top.show_after_px));
            let win = window.clone();
            let button = button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let y = win.scroll_y().unwrap_or(0.0);
                if let Some(visible) = state.borrow_mut().on_scroll(y) {
                    let _ = button.class_list().toggle_with_force("visible", visible);
                }
            });
            let _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let win = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let opts = ScrollToOptions::new();
                opts.set_top(0.0);
                opts.set_behavior(ScrollBehavior::Smooth);
                win.scroll_to_with_scroll_to_options(&opts);
            });
            let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_glow(card: &HtmlElement, pos: GlowPosition) {
        let style = card.style();
        for (name, value) in pos.css_vars() {
            let _ = style.set_property(name, &value);
        }
    }

    fn mount_glow_cards(document: &Document) {
        let Ok(cards) = document.query_selector_all(".glow-card") else {
            return;
        };
        for i in 0..cards.length() {
            let Some(card) = cards.item(i).and_then(|n| n.dyn_into::<HtmlElement>().ok()) else {
                continue;
            };

            {
                let target = card.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    let r = target.get_bounding_client_rect();
                    let rect = Rect {
                        left: r.left(),
                        top: r.top(),
                        width: r.width(),
                        height: r.height(),
                    };
                    let pos = glow_position(rect, event.client_x() as f64, event.client_y() as f64);
                    set_glow(&target, pos);
                });
                let _ = card
                    .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let target = card.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                    set_glow(&target, GlowPosition::CENTER);
                });
                let _ = card
                    .add_event_listener_with_callback("pointerleave", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
        log::debug!("Glow enabled on {} cards", cards.length());
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");
        log::info!("GrandHub counters starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window, nothing to mount");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document, nothing to mount");
            return;
        };

        let settings = Settings::load();

        mount_social_proof(&document, &settings);

        let mounts: Mounts = Rc::new(RefCell::new(Vec::new()));
        if let Ok(nodes) = document.query_selector_all("[data-count-up]") {
            for i in 0..nodes.length() {
                let Some(el) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                if let Some(mount) = mount_counter(el, &settings) {
                    mounts.borrow_mut().push(mount);
                }
            }
        }
        log::info!("Mounted {} counters", mounts.borrow().len());

        watch_removals(&document, mounts.clone());

        // A page kept in the back/forward cache keeps its counters
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
                let persisted = event.persisted();
                for mount in mounts.borrow().iter() {
                    page_hidden(mount, persisted);
                }
                if persisted {
                    log::debug!("Page cached, counters kept");
                } else {
                    mounts.borrow_mut().clear();
                }
            });
            let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        mount_scroll_top(&window, &document, &settings);
        mount_glow_cards(&document);

        log::info!("GrandHub counters running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_landing::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("GrandHub counters (native) starting...");
    log::info!("The landing page runs in the browser - build with `trunk serve` for the web version");

    println!("\nSimulating counters...");
    simulate_counters();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn simulate_counters() {
    use grandhub_counters::anim::{AnimatedCounter, CounterProps, Intersection};
    use grandhub_counters::persistence::{MemoryStore, PersistentCounterStore};
    use grandhub_counters::platform;
    use grandhub_counters::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let settings = Settings::load();

    let props = CounterProps::new(1000).with_suffix("+").with_grouping(true);
    let mut counter = AnimatedCounter::new(props, settings.animation.visibility_threshold);
    counter.on_intersection(Intersection::new(1.0, true));

    let mut now = 0.0;
    let mut frames = 0;
    while let Some(frame) = counter.on_frame(now) {
        frames += 1;
        if frames % 20 == 1 || !frame.more {
            println!("  t={:>6.1}ms  {}", now, counter.text());
        }
        if !frame.more {
            break;
        }
        now += 1000.0 / 60.0;
    }
    println!("✓ Counter reached {} in {} frames", counter.text(), frames);

    let rng = Pcg32::seed_from_u64(platform::rng_seed());
    let mut store = PersistentCounterStore::new(MemoryStore::new(), rng);
    for visit in 1..=3 {
        println!("  visit {}: {} users", visit, store.bump(&settings.social_proof));
    }
}
