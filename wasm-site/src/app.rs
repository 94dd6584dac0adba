//! One initialisation of every page component.
//!
//! An [`App`] owns all live bindings. Dropping it detaches every listener,
//! observer and pending timer, which is what makes re-initialisation safe
//! to repeat.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;

use site_core::config::SiteConfig;
use site_core::context::AppContext;

use crate::carousel::CarouselBinding;
use crate::dialogs::{PopupBinding, TeamModalBinding};
use crate::dom::{self, Observer};
use crate::header::{bind_smooth_scroll, HeaderBinding};
use crate::widgets::{bind_accordion, bind_lazy_images, NewsletterBinding, StatsBinding};

pub struct App {
    context: Rc<RefCell<AppContext>>,
    carousels: Vec<CarouselBinding>,
    _header: Option<HeaderBinding>,
    _smooth_scroll: Vec<EventListener>,
    _stats: Option<StatsBinding>,
    _accordion: Vec<EventListener>,
    _team_modal: Option<TeamModalBinding>,
    _newsletter: Option<NewsletterBinding>,
    _lazy_images: Option<Observer>,
    _popup: Option<PopupBinding>,
}

impl App {
    /// Bind every component present on the page. `None` outside a
    /// browsing context.
    pub fn init(config: &SiteConfig) -> Option<Self> {
        let window = dom::window()?;
        let document = window.document()?;
        log::info!("BlackBird Capital - Initializing");

        let reduced_motion = dom::prefers_reduced_motion(&window);
        let context = Rc::new(RefCell::new(AppContext::new(reduced_motion)));
        let snapshot = context.borrow().clone();

        let header = HeaderBinding::bind(&window, &document, &config.header, context.clone());
        let smooth_scroll = bind_smooth_scroll(&window, &document, &config.header, &snapshot);
        let carousels: Vec<CarouselBinding> = config
            .carousels
            .iter()
            .filter_map(|carousel| {
                let tuning = &config.carousel;
                CarouselBinding::bind(&window, &document, carousel, tuning, context.clone())
            })
            .collect();
        let stats = StatsBinding::bind(&document, config.counter_duration_ms, &snapshot);
        let accordion = bind_accordion(&document);
        let team_modal = TeamModalBinding::bind(&document, context.clone());
        let newsletter = NewsletterBinding::bind(
            &document,
            &config.newsletter_success_label,
            config.newsletter_revert_ms,
        );
        let lazy_images = bind_lazy_images(&window, &document);
        let popup = PopupBinding::bind(&document, config.popup_delay_ms);

        if let Some(body) = document.body() {
            dom::set_class(&body, "js-initialized", true);
        }
        log::debug!(
            "initialised: {} carousel(s), header={}, counters={}, newsletter={}",
            carousels.len(),
            header.is_some(),
            stats.is_some(),
            newsletter.is_some()
        );

        Some(Self {
            context,
            carousels,
            _header: header,
            _smooth_scroll: smooth_scroll,
            _stats: stats,
            _accordion: accordion,
            _team_modal: team_modal,
            _newsletter: newsletter,
            _lazy_images: lazy_images,
            _popup: popup,
        })
    }

    pub fn snapshot(&self) -> AppContext {
        self.context.borrow().clone()
    }

    pub fn carousels(&self) -> &[CarouselBinding] {
        &self.carousels
    }
}
