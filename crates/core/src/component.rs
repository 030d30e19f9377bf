//! Attach a cookie store to components of a UI tree.
//!
//! A component either declares its own store or inherits its parent's. The
//! parent's store is passed down explicitly when a child is built; components
//! never hold a reference back to their parent.

use std::{cell::RefCell, fmt, rc::Rc};

use crate::selector::Cookies;

/// Store handle shared by every component in a subtree.
pub type SharedCookies = Rc<RefCell<Cookies>>;

pub fn shared(cookies: Cookies) -> SharedCookies {
    Rc::new(RefCell::new(cookies))
}

/// How a component declares its own store.
pub enum CookieSource {
    Instance(SharedCookies),
    /// Invoked once per component created from these options.
    Factory(Box<dyn Fn() -> SharedCookies>),
}

impl CookieSource {
    pub fn factory(factory: impl Fn() -> SharedCookies + 'static) -> Self {
        Self::Factory(Box::new(factory))
    }

    pub fn resolve(&self) -> SharedCookies {
        match self {
            Self::Instance(cookies) => Rc::clone(cookies),
            Self::Factory(factory) => factory(),
        }
    }
}

impl fmt::Debug for CookieSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance(cookies) => f.debug_tuple("Instance").field(cookies).finish(),
            Self::Factory(_) => f.write_str("Factory"),
        }
    }
}

/// Per-component configuration seen by lifecycle hooks.
#[derive(Debug, Default)]
pub struct ComponentOptions {
    pub name: Option<String>,
    pub cookies: Option<CookieSource>,
}

impl ComponentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cookies(mut self, source: CookieSource) -> Self {
        self.cookies = Some(source);
        self
    }
}

/// A created component and the store bound to it, if any.
#[derive(Debug, Default)]
pub struct Component {
    name: Option<String>,
    cookies: Option<SharedCookies>,
}

impl Component {
    /// Create a top-level component.
    pub fn root(options: &ComponentOptions) -> Self {
        Self::create(options, None, &[&CookiesMixin])
    }

    /// Create a child of `self`, inheriting its store unless `options` declares one.
    pub fn child(&self, options: &ComponentOptions) -> Self {
        Self::create(options, Some(self), &[&CookiesMixin])
    }

    /// Create a component, running `hooks` before anything else touches it.
    pub fn create(
        options: &ComponentOptions,
        parent: Option<&Component>,
        hooks: &[&dyn BeforeCreate],
    ) -> Self {
        let mut component = Self {
            name: options.name.clone(),
            cookies: None,
        };
        for hook in hooks {
            hook.before_create(&mut component, options, parent);
        }
        component
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn cookies(&self) -> Option<&SharedCookies> {
        self.cookies.as_ref()
    }

    pub fn set_cookies(&mut self, cookies: Option<SharedCookies>) {
        self.cookies = cookies;
    }
}

/// Lifecycle hook run once per component, before its other initialization.
pub trait BeforeCreate {
    fn before_create(
        &self,
        component: &mut Component,
        options: &ComponentOptions,
        parent: Option<&Component>,
    );
}

/// Binds a store: declared source first, then the parent's, else none.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookiesMixin;

impl BeforeCreate for CookiesMixin {
    fn before_create(
        &self,
        component: &mut Component,
        options: &ComponentOptions,
        parent: Option<&Component>,
    ) {
        let cookies = match &options.cookies {
            Some(source) => Some(source.resolve()),
            None => parent.and_then(Component::cookies).map(Rc::clone),
        };
        component.set_cookies(cookies);
    }
}

/// Host framework able to register global lifecycle hooks.
pub trait ComponentHost {
    fn mixin(&mut self, hook: Box<dyn BeforeCreate>);
}

/// Registers [`CookiesMixin`] on a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookiesPlugin;

impl CookiesPlugin {
    pub fn install<H: ComponentHost + ?Sized>(host: &mut H) {
        host.mixin(Box::new(CookiesMixin));
    }
}
