use serde_json::json;

use crate::dispatcher::{Request, Response};
use crate::view::{CallArgs, View};

/// View that echoes back the request and the arguments it was called with
pub fn echo_view(name: &str) -> View {
    let label = name.to_string();
    View::new(name, move |req: &mut Request, args: &CallArgs| {
        Response::json(
            200,
            json!({
                "view": label,
                "method": req.method.as_str(),
                "path": req.path,
                "args": args.positional,
                "kwargs": args.keyword,
                "attributes": req.attributes,
            }),
        )
    })
}
