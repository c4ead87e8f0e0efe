use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::group::PatternGroup;
use super::route::{RouteEntry, ViewRef};
use crate::config::RouterConfig;
use crate::dispatcher::{Request, Response};
use crate::error::RouteError;
use crate::ids::SessionId;
use crate::method::MethodResolver;
use crate::pattern::{reverse_consuming, PathMatcher, PatternMatch, RegexPattern};
use crate::registry::{qualify, ViewRegistry};
use crate::view::{CallArgs, Handler, Kwargs, View};
use crate::wrapper::WrapperChain;

/// Binding set by [`RoutingTable::register`]; absent for raw entries
#[derive(Debug, Clone)]
struct Binding {
    session: SessionId,
    wrappers: WrapperChain,
    group: Option<Arc<PatternGroup>>,
}

#[derive(Debug, Clone)]
struct CompiledRoute {
    matcher: Arc<dyn PathMatcher>,
    method: Option<Method>,
    view: View,
    default_args: Kwargs,
    name: Option<String>,
    binding: Option<Binding>,
}

#[derive(Debug, Clone)]
struct IncludedTable {
    prefix: Arc<dyn PathMatcher>,
    table: Arc<RoutingTable>,
    default_args: Kwargs,
}

#[derive(Debug, Clone)]
enum Node {
    Route(CompiledRoute),
    Include(IncludedTable),
}

/// One row of [`RoutingTable::routes`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// Pattern text, prefixed by the patterns of enclosing includes
    pub pattern: String,
    /// Declared method, `None` for routes accepting every method
    pub method: Option<String>,
    pub view: String,
    pub name: Option<String>,
    /// Whether the route went through `register`
    pub configured: bool,
}

/// Ordered list of routes and nested tables, resolved first match wins.
///
/// Routes are added in batches with [`RoutingTable::register`]. Every batch
/// gets a fresh [`SessionId`]; method-specific routes of one batch that share
/// the exact same pattern text share one [`PatternGroup`], so a single path
/// can dispatch to a different view per HTTP method.
#[derive(Debug, Clone, Default)]
pub struct RoutingTable {
    nodes: Vec<Node>,
    groups: HashMap<(SessionId, String), Arc<PatternGroup>>,
    registry: Arc<ViewRegistry>,
    resolver: MethodResolver,
}

impl RoutingTable {
    /// Empty table with an empty view registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty table resolving named view references against `registry`
    #[must_use]
    pub fn with_registry(registry: ViewRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            ..Self::default()
        }
    }

    /// Apply runtime configuration (override field name)
    #[must_use]
    pub fn with_config(mut self, config: &RouterConfig) -> Self {
        self.resolver = MethodResolver::new(&config.method_override_field);
        self
    }

    #[must_use]
    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    #[must_use]
    pub fn method_resolver(&self) -> &MethodResolver {
        &self.resolver
    }

    /// Number of top-level nodes (routes and includes)
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pattern group registered by `session` for the exact pattern text
    #[must_use]
    pub fn group(&self, session: SessionId, pattern: &str) -> Option<&Arc<PatternGroup>> {
        self.groups.get(&(session, pattern.to_string()))
    }

    /// Register a batch of routes under a fresh session, all bound to `wrappers`.
    ///
    /// Either every entry is added or, on error, none is.
    ///
    /// # Errors
    ///
    /// `EmptyViewReference`, `UnknownView` or `InvalidPattern` for the first
    /// entry that fails to configure.
    pub fn register(
        &mut self,
        entries: Vec<RouteEntry>,
        wrappers: WrapperChain,
    ) -> Result<SessionId, RouteError> {
        let session = SessionId::new();

        let mut compiled = Vec::with_capacity(entries.len());
        for entry in entries {
            let view = self.resolve_view(&entry)?;
            let matcher: Arc<dyn PathMatcher> = Arc::new(RegexPattern::compile(&entry.pattern)?);
            compiled.push((entry, matcher, view));
        }

        let mut building: HashMap<String, PatternGroup> = HashMap::new();
        for (entry, _, view) in &compiled {
            if let Some(method) = &entry.method {
                building
                    .entry(entry.pattern.clone())
                    .or_insert_with(|| PatternGroup::new(session, &entry.pattern))
                    .add_method(method.clone(), view.clone(), entry.default_args.clone());
            }
        }
        let frozen: HashMap<String, Arc<PatternGroup>> = building
            .into_iter()
            .map(|(pattern, group)| (pattern, Arc::new(group)))
            .collect();

        let added = compiled.len();
        for (entry, matcher, view) in compiled {
            let group = entry
                .method
                .as_ref()
                .and_then(|_| frozen.get(&entry.pattern))
                .map(Arc::clone);
            // Grouped routes take their defaults from the group record at dispatch
            let default_args = if group.is_some() {
                Kwargs::new()
            } else {
                entry.default_args
            };
            debug!(
                session = %session,
                pattern = %entry.pattern,
                method = ?entry.method,
                view = %view.name(),
                grouped = group.is_some(),
                "Route bound"
            );
            self.nodes.push(Node::Route(CompiledRoute {
                matcher,
                method: entry.method,
                view,
                default_args,
                name: entry.name,
                binding: Some(Binding {
                    session,
                    wrappers: wrappers.clone(),
                    group,
                }),
            }));
        }
        let group_count = frozen.len();
        for (pattern, group) in frozen {
            self.groups.insert((session, pattern), group);
        }

        info!(
            session = %session,
            routes = added,
            groups = group_count,
            wrappers = wrappers.len(),
            total_nodes = self.nodes.len(),
            "Routes registered"
        );
        Ok(session)
    }

    /// Append a route without binding it to a session or wrapper chain.
    ///
    /// Resolving a path that matches such a route fails with
    /// [`RouteError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// The same configuration errors as [`RoutingTable::register`].
    pub fn push_unconfigured(&mut self, entry: RouteEntry) -> Result<(), RouteError> {
        let view = self.resolve_view(&entry)?;
        let matcher: Arc<dyn PathMatcher> = Arc::new(RegexPattern::compile(&entry.pattern)?);
        warn!(pattern = %entry.pattern, "Unconfigured route added");
        self.nodes.push(Node::Route(CompiledRoute {
            matcher,
            method: entry.method,
            view,
            default_args: entry.default_args,
            name: entry.name,
            binding: None,
        }));
        Ok(())
    }

    /// Nest `table` under `prefix`.
    ///
    /// The rest of the path after the prefix match is resolved by `table`.
    /// Named captures of the prefix and `default_args` become keyword
    /// arguments of the nested match; the nested match's own keyword
    /// arguments take precedence.
    ///
    /// # Errors
    ///
    /// `InvalidPattern` if `prefix` does not compile.
    pub fn include(
        &mut self,
        prefix: &str,
        table: RoutingTable,
        default_args: Kwargs,
    ) -> Result<(), RouteError> {
        let matcher: Arc<dyn PathMatcher> = Arc::new(RegexPattern::compile(prefix)?);
        info!(prefix = %prefix, nested_nodes = table.len(), "Table included");
        self.nodes.push(Node::Include(IncludedTable {
            prefix: matcher,
            table: Arc::new(table),
            default_args,
        }));
        Ok(())
    }

    /// Resolve a request path (one leading `/` is removed before matching).
    ///
    /// Returns `Ok(None)` when nothing matches.
    ///
    /// # Errors
    ///
    /// [`RouteError::NotConfigured`] when the first matching route was never
    /// registered through [`RoutingTable::register`].
    pub fn resolve(&self, path: &str) -> Result<Option<ResolvedCall>, RouteError> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        let resolved = self.resolve_relative(relative)?;
        match &resolved {
            Some(call) => debug!(
                path = %path,
                view = %call.view.name(),
                session = %call.view.session(),
                "Path resolved"
            ),
            None => warn!(path = %path, "No route matched"),
        }
        Ok(resolved)
    }

    fn resolve_relative(&self, path: &str) -> Result<Option<ResolvedCall>, RouteError> {
        for node in &self.nodes {
            match node {
                Node::Route(route) => {
                    let Some(matched) = route.matcher.match_path(path) else {
                        continue;
                    };
                    let Some(binding) = &route.binding else {
                        return Err(RouteError::NotConfigured {
                            pattern: route.matcher.as_str().to_string(),
                        });
                    };
                    let mut args = call_args(matched);
                    args.apply_defaults(&route.default_args);
                    return Ok(Some(ResolvedCall {
                        view: self.resolved_view(route, binding),
                        args,
                    }));
                }
                Node::Include(include) => {
                    let Some(matched) = include.prefix.match_path(path) else {
                        continue;
                    };
                    let rest = path.get(matched.end..).unwrap_or_default();
                    let Some(mut call) = include.table.resolve_relative(rest)? else {
                        continue;
                    };
                    let mut keyword: Kwargs = matched.named.into_iter().collect();
                    keyword.extend(include.default_args.clone());
                    if keyword.is_empty() {
                        let mut positional = matched.positional;
                        positional.extend(call.args.positional);
                        call.args.positional = positional;
                    }
                    keyword.append(&mut call.args.keyword);
                    call.args.keyword = keyword;
                    return Ok(Some(call));
                }
            }
        }
        Ok(None)
    }

    fn resolved_view(&self, route: &CompiledRoute, binding: &Binding) -> ResolvedView {
        let target = match &binding.group {
            Some(group) => Target::Grouped {
                group: Arc::clone(group),
                wrappers: binding.wrappers.clone(),
                resolver: self.resolver.clone(),
            },
            None => Target::Direct {
                handler: route.view.handler(),
                wrappers: binding.wrappers.clone(),
            },
        };
        ResolvedView {
            name: route.view.name().to_string(),
            csrf_exempt: route.view.is_csrf_exempt(),
            session: binding.session,
            target,
        }
    }

    fn resolve_view(&self, entry: &RouteEntry) -> Result<View, RouteError> {
        match &entry.view {
            ViewRef::Direct(view) => Ok(view.clone()),
            ViewRef::Named(name) if name.is_empty() => Err(RouteError::EmptyViewReference {
                pattern: entry.pattern.clone(),
            }),
            ViewRef::Named(name) => {
                let qualified = qualify(entry.prefix.as_deref(), name);
                self.registry
                    .get(&qualified)
                    .cloned()
                    .ok_or(RouteError::UnknownView {
                        pattern: entry.pattern.clone(),
                        view: qualified,
                    })
            }
        }
    }

    /// Build the path for the route named `lookup` (route name first, then
    /// qualified view name), searching nested tables too.
    ///
    /// Each include prefix and the final route must match their part of the
    /// candidate in full. Every keyword must fill a group, except ones that
    /// repeat a route default with the same value.
    ///
    /// # Errors
    ///
    /// [`RouteError::NoReverseMatch`] if no route with that name can produce
    /// a path for the given arguments.
    pub fn reverse(
        &self,
        lookup: &str,
        args: &[&str],
        kwargs: &BTreeMap<String, String>,
    ) -> Result<String, RouteError> {
        let found = self
            .reverse_relative(lookup, args, kwargs, |route| {
                route.name.as_deref() == Some(lookup)
            })
            .or_else(|| {
                self.reverse_relative(lookup, args, kwargs, |route| route.view.name() == lookup)
            });
        match found {
            Some(path) => Ok(format!("/{path}")),
            None => {
                debug!(lookup = %lookup, "Reverse lookup failed");
                Err(RouteError::NoReverseMatch {
                    lookup: lookup.to_string(),
                })
            }
        }
    }

    fn reverse_relative<F>(
        &self,
        lookup: &str,
        args: &[&str],
        kwargs: &BTreeMap<String, String>,
        wanted: F,
    ) -> Option<String>
    where
        F: Fn(&CompiledRoute) -> bool + Copy,
    {
        for node in &self.nodes {
            match node {
                Node::Route(route) if wanted(route) => {
                    if let Some(path) =
                        reverse_verified(route.matcher.as_ref(), args, kwargs, &route.default_args)
                    {
                        return Some(path);
                    }
                }
                Node::Route(_) => {}
                Node::Include(include) => {
                    let Some((prefix, consumed)) =
                        reverse_consuming(include.prefix.as_str(), &[], kwargs)
                    else {
                        continue;
                    };
                    if !matches_whole(include.prefix.as_ref(), &prefix) {
                        continue;
                    }
                    let remaining: BTreeMap<String, String> = kwargs
                        .iter()
                        .filter(|(key, _)| !consumed.contains(key.as_str()))
                        .map(|(key, value)| (key.clone(), value.clone()))
                        .collect();
                    if let Some(rest) =
                        include.table.reverse_relative(lookup, args, &remaining, wanted)
                    {
                        return Some(format!("{prefix}{rest}"));
                    }
                }
            }
        }
        None
    }

    /// Declared routes in resolution order, nested tables flattened
    #[must_use]
    pub fn routes(&self) -> Vec<RouteInfo> {
        let mut out = Vec::new();
        self.collect_routes("", &mut out);
        out
    }

    fn collect_routes(&self, prefix: &str, out: &mut Vec<RouteInfo>) {
        for node in &self.nodes {
            match node {
                Node::Route(route) => out.push(RouteInfo {
                    pattern: format!("{prefix}{}", route.matcher.as_str()),
                    method: route.method.as_ref().map(ToString::to_string),
                    view: route.view.name().to_string(),
                    name: route.name.clone(),
                    configured: route.binding.is_some(),
                }),
                Node::Include(include) => {
                    let nested = format!("{prefix}{}", include.prefix.as_str());
                    include.table.collect_routes(&nested, out);
                }
            }
        }
    }

    /// Log every route at info level
    pub fn dump_routes(&self) {
        for route in self.routes() {
            info!(
                pattern = %route.pattern,
                method = route.method.as_deref().unwrap_or("*"),
                view = %route.view,
                name = route.name.as_deref().unwrap_or(""),
                configured = route.configured,
                "Route"
            );
        }
    }
}

/// Reverse `matcher` and check the candidate resolves back to it. Keywords
/// with no group are accepted only when they repeat one of `defaults`.
fn reverse_verified(
    matcher: &dyn PathMatcher,
    args: &[&str],
    kwargs: &BTreeMap<String, String>,
    defaults: &Kwargs,
) -> Option<String> {
    let (candidate, used) = reverse_consuming(matcher.as_str(), args, kwargs)?;
    let extras_are_defaults = kwargs
        .iter()
        .filter(|(key, _)| !used.contains(key.as_str()))
        .all(|(key, value)| defaults.get(key).is_some_and(|d| same_value(d, value)));
    (extras_are_defaults && matches_whole(matcher, &candidate)).then_some(candidate)
}

fn matches_whole(matcher: &dyn PathMatcher, candidate: &str) -> bool {
    matcher
        .match_path(candidate)
        .is_some_and(|matched| matched.end == candidate.len())
}

fn same_value(default: &Value, given: &str) -> bool {
    match default {
        Value::String(s) => s == given,
        other => other.to_string() == given,
    }
}

/// Named captures win: if the pattern has any named group, unnamed ones are dropped
fn call_args(matched: PatternMatch) -> CallArgs {
    if matched.has_named_groups {
        CallArgs::new(Default::default(), matched.named.into_iter().collect())
    } else {
        CallArgs::new(matched.positional, Kwargs::new())
    }
}

#[derive(Clone)]
enum Target {
    Direct {
        handler: Handler,
        wrappers: WrapperChain,
    },
    Grouped {
        group: Arc<PatternGroup>,
        wrappers: WrapperChain,
        resolver: MethodResolver,
    },
}

/// The callable selected by a path match.
///
/// For a method-specific route the concrete view is picked per call from
/// the route's [`PatternGroup`] using the request's effective method.
#[derive(Clone)]
pub struct ResolvedView {
    name: String,
    csrf_exempt: bool,
    session: SessionId,
    target: Target,
}

impl ResolvedView {
    /// Name of the matched route's view
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the matched view opted out of CSRF checks
    #[must_use]
    pub fn csrf_exempt(&self) -> bool {
        self.csrf_exempt
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// Methods this view answers, `None` when it accepts every method
    #[must_use]
    pub fn allowed_methods(&self) -> Option<&[Method]> {
        match &self.target {
            Target::Direct { .. } => None,
            Target::Grouped { group, .. } => Some(group.allowed_methods()),
        }
    }

    /// Run the view behind its wrapper chain
    pub fn call(&self, req: &mut Request, args: &CallArgs) -> Response {
        match &self.target {
            Target::Direct { handler, wrappers } => {
                let handler = wrappers.compose(Arc::clone(handler));
                handler(req, args)
            }
            Target::Grouped {
                group,
                wrappers,
                resolver,
            } => {
                let method = match resolver.effective_method(req) {
                    Ok(method) => method,
                    Err(err) => {
                        warn!(
                            pattern = %group.pattern_key(),
                            error = %err,
                            "Invalid method override"
                        );
                        return Response::method_not_allowed(group.allowed_methods());
                    }
                };
                let Some(record) = group.dispatch(&method) else {
                    warn!(
                        pattern = %group.pattern_key(),
                        method = %method,
                        "Method not allowed"
                    );
                    return Response::method_not_allowed(group.allowed_methods());
                };
                let mut args = args.clone();
                args.apply_defaults(&record.default_args);
                let handler = wrappers.compose(record.view.handler());
                handler(req, &args)
            }
        }
    }
}

impl fmt::Debug for ResolvedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedView")
            .field("name", &self.name)
            .field("csrf_exempt", &self.csrf_exempt)
            .field("session", &self.session)
            .field("allowed_methods", &self.allowed_methods())
            .finish_non_exhaustive()
    }
}

/// A resolved view together with the arguments captured from the path
#[derive(Debug, Clone)]
pub struct ResolvedCall {
    pub view: ResolvedView,
    pub args: CallArgs,
}

impl ResolvedCall {
    /// Invoke the view with the captured arguments
    pub fn call(&self, req: &mut Request) -> Response {
        self.view.call(req, &self.args)
    }
}
