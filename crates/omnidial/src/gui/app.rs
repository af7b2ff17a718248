use crate::config::{self, Config};
use crate::events::AppEvent;
use crate::gui::assets;
use crate::gui::audio::CuePlayer;
use crate::gui::surface::CairoSurface;
use crate::gui::theme;
use dial::{Assets, DialSession, Point, PointerEvent, Size, Theme};
use gdk_pixbuf::Pixbuf;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

pub const DEFAULT_WIDTH: i32 = 1280;
pub const DEFAULT_HEIGHT: i32 = 960;

/// Images and colors the draw function needs alongside the session.
pub struct Scene {
    pub assets: Assets<Pixbuf>,
    pub theme: Theme,
}

impl Scene {
    pub fn from_config(config: &Config) -> Self {
        Self {
            assets: assets::load(config),
            theme: config.theme.clone(),
        }
    }
}

pub struct AppInit {
    pub config: Config,
    pub session: DialSession,
    pub config_path: PathBuf,
    pub assets_dir: Option<PathBuf>,
    pub events: async_channel::Receiver<AppEvent>,
}

pub struct AppModel {
    pub session: Rc<RefCell<DialSession>>,
    pub scene: Rc<RefCell<Scene>>,
    pub cues: Rc<RefCell<CuePlayer>>,
    pub config_path: PathBuf,
    pub assets_dir: Option<PathBuf>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    Pointer(PointerEvent),
    Resize(Size),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = AppInit;
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("Omnidial"),
            set_default_size: (DEFAULT_WIDTH, DEFAULT_HEIGHT),
            add_css_class: "omnidial-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "omnidial-drawing-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(Size::new(width as f64, height as f64)));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::Pointer(PointerEvent::Down(Point::new(x, y))));
                    },
                    connect_drag_update[sender] => move |gesture, dx, dy| {
                        if let Some((x, y)) = gesture.start_point() {
                            let p = Point::new(x + dx, y + dy);
                            sender.input(AppMsg::Pointer(PointerEvent::Move(p)));
                        }
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::Pointer(PointerEvent::Up));
                    },
                },

                // Released only fires when the press never turned into a drag.
                add_controller = gtk::GestureClick {
                    connect_released[sender] => move |_, _, x, y| {
                        sender.input(AppMsg::Pointer(PointerEvent::Tap(Point::new(x, y))));
                    }
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let AppInit {
            config,
            session,
            config_path,
            assets_dir,
            events,
        } = init;

        theme::load_css();

        let model = AppModel {
            session: Rc::new(RefCell::new(session)),
            scene: Rc::new(RefCell::new(Scene::from_config(&config))),
            cues: Rc::new(RefCell::new(CuePlayer::load(&config.sound_paths()))),
            config_path,
            assets_dir,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let session_draw = model.session.clone();
        let scene_draw = model.scene.clone();
        widgets
            .drawing_area
            .set_draw_func(move |_, cr, _, _| {
                let scene = scene_draw.borrow();
                let mut surface = CairoSurface::new(cr);
                let session = session_draw.borrow();
                if let Err(e) =
                    dial::render::draw(&mut surface, &session.frame(), &scene.assets, &scene.theme)
                {
                    log::error!("Drawing error: {}", e);
                }
            });

        let session_tick = model.session.clone();
        let cues_tick = model.cues.clone();
        widgets
            .drawing_area
            .add_tick_callback(move |drawing_area, clock| {
                let now = Duration::from_micros(clock.frame_time().max(0) as u64);
                session_tick
                    .borrow_mut()
                    .tick(now, &mut *cues_tick.borrow_mut());
                drawing_area.queue_draw();
                glib::ControlFlow::Continue
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = events.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::Pointer(event) => {
                self.session
                    .borrow_mut()
                    .handle_pointer(event, &mut *self.cues.borrow_mut());
                self.drawing_area.queue_draw();
            }
            AppMsg::Resize(size) => {
                if let Err(e) = self.session.borrow_mut().resize(size) {
                    log::warn!("Ignoring resize to {}x{}: {}", size.width, size.height, e);
                }
            }
            AppMsg::ConfigReload => self.reload(),
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}

impl AppModel {
    /// Rebuilds the dial from the config file. The running dial is kept when
    /// the new config does not load or describes an invalid dial.
    fn reload(&mut self) {
        let mut config = match config::load_config(&self.config_path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };
        if let Some(dir) = &self.assets_dir {
            config.assets.dir = dir.clone();
        }

        let viewport = self.session.borrow().geometry().viewport();
        match config.build_session(viewport) {
            Ok(session) => {
                *self.session.borrow_mut() = session;
                *self.scene.borrow_mut() = Scene::from_config(&config);
                *self.cues.borrow_mut() = CuePlayer::load(&config.sound_paths());
                self.drawing_area.queue_draw();
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Rejected reloaded config: {}", e),
        }
    }
}
