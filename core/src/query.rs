//! Query-parameter marshaling.

use std::collections::HashMap;

use crate::schema::RequestSchema;

/// Map each set field of `request` to its textual value.
///
/// Fields holding their zero value are omitted. `None` yields an empty map.
pub fn to_query_params<T: RequestSchema>(request: Option<&T>) -> HashMap<String, String> {
    let Some(request) = request else {
        return HashMap::new();
    };

    T::FIELDS
        .iter()
        .filter_map(|field| {
            let value = (field.value)(request);
            (!value.is_zero()).then(|| (field.name.to_string(), value.to_string()))
        })
        .collect()
}

/// Form-urlencode `params` with keys in ascending order.
pub fn encode_query(params: &HashMap<String, String>) -> String {
    let mut pairs: Vec<_> = params.iter().collect();
    pairs.sort();

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}
