// File: crates/bubble-core/src/hooks.rs
// Summary: Lifecycle hook composer; stacks extension wrappers over a base method and freezes them into a chain.
// Notes:
// - Each install receives the composition built so far and returns its replacement, so an
//   extension only ever sees "the original" it captured, never its siblings.
// - No error isolation between layers: an `Err` from any wrapper propagates to the caller.

use std::fmt;
use std::rc::Rc;

use anyhow::Result;
use tracing::{debug, trace};

/// Shared lifecycle method: host state `S`, argument `A`, result `R`.
pub type Hook<S, A, R> = Rc<dyn Fn(&mut S, A) -> Result<R>>;

/// Box a closure as a [`Hook`].
pub fn hook<S, A, R, F>(f: F) -> Hook<S, A, R>
where
    F: Fn(&mut S, A) -> Result<R> + 'static,
{
    Rc::new(f)
}

/// Wrapper that runs the captured `original` first, then `augment`, and returns the original's result.
pub fn after<S, A, R, F>(original: Hook<S, A, R>, augment: F) -> Hook<S, A, R>
where
    S: 'static,
    A: Clone + 'static,
    R: 'static,
    F: Fn(&mut S, A) -> Result<()> + 'static,
{
    Rc::new(move |state: &mut S, arg: A| {
        let out = original(state, arg.clone())?;
        augment(state, arg)?;
        Ok(out)
    })
}

/// Wrapper that runs `augment` first, then delegates to the captured `original`.
pub fn before<S, A, R, F>(original: Hook<S, A, R>, augment: F) -> Hook<S, A, R>
where
    S: 'static,
    A: Clone + 'static,
    R: 'static,
    F: Fn(&mut S, A) -> Result<()> + 'static,
{
    Rc::new(move |state: &mut S, arg: A| {
        augment(state, arg.clone())?;
        original(state, arg)
    })
}

/// Mutable builder for one lifecycle method.
pub struct HookComposer<S, A, R> {
    method: &'static str,
    current: Hook<S, A, R>,
    layers: Vec<String>,
}

impl<S, A, R> HookComposer<S, A, R> {
    pub fn new(method: &'static str, base: Hook<S, A, R>) -> Self {
        Self { method, current: base, layers: Vec::new() }
    }

    /// Replace the method with `factory(current)`.
    ///
    /// `factory` receives whatever is bound right now (the base, or the composition of
    /// earlier installs) and must return a function with the same signature.
    pub fn install<F>(&mut self, extension: impl Into<String>, factory: F) -> &mut Self
    where
        F: FnOnce(Hook<S, A, R>) -> Hook<S, A, R>,
    {
        let extension = extension.into();
        self.current = factory(Rc::clone(&self.current));
        debug!(method = self.method, extension = %extension, depth = self.layers.len() + 1, "hook installed");
        self.layers.push(extension);
        self
    }

    /// The function currently bound to this method.
    pub fn current(&self) -> &Hook<S, A, R> { &self.current }

    pub fn method(&self) -> &'static str { self.method }

    /// Extension names in installation order.
    pub fn layers(&self) -> &[String] { &self.layers }

    pub fn build(self) -> HookChain<S, A, R> {
        debug!(method = self.method, layers = ?self.layers, "hook chain frozen");
        HookChain { method: self.method, entry: self.current, layers: self.layers.into() }
    }
}

/// Immutable composed lifecycle method.
pub struct HookChain<S, A, R> {
    method: &'static str,
    entry: Hook<S, A, R>,
    layers: Rc<[String]>,
}

impl<S, A, R> HookChain<S, A, R> {
    /// Invoke the outermost wrapper.
    pub fn call(&self, state: &mut S, arg: A) -> Result<R> {
        trace!(method = self.method, layers = self.layers.len(), "hook chain call");
        (self.entry)(state, arg)
    }

    pub fn method(&self) -> &'static str { self.method }

    /// Extension names in installation order.
    pub fn layers(&self) -> &[String] { &self.layers }
}

impl<S, A, R> Clone for HookChain<S, A, R> {
    fn clone(&self) -> Self {
        Self { method: self.method, entry: Rc::clone(&self.entry), layers: Rc::clone(&self.layers) }
    }
}

impl<S, A, R> fmt::Debug for HookChain<S, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain").field("method", &self.method).field("layers", &self.layers).finish()
    }
}
