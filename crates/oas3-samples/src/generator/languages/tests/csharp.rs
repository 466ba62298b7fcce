use super::{deployment, keywords};
use crate::{
  generator::languages::{CSharp, ModelLanguage},
  spec::SchemaType,
};

#[test]
fn test_csharp_types() {
  assert_eq!(CSharp.primitive_type(SchemaType::Boolean), "bool");
  assert_eq!(CSharp.primitive_type(SchemaType::Integer), "long");
  assert_eq!(CSharp.primitive_type(SchemaType::Number), "double");
  assert_eq!(CSharp.object_type(), "object");
}

#[test]
fn test_csharp_render() {
  let source = CSharp.render(&deployment());
  assert_eq!(
    source,
    "\
public class Deployment
{
    public string name;
    public object tags;
    public List<Provider> providers;

    public class Provider
    {
        public string id;
        public string @namespace;
    }
}
"
  );
}

#[test]
fn test_csharp_keywords_are_escaped() {
  let model = CSharp.response_model(&keywords());
  let fields: Vec<&str> = model.declarations[0]
    .fields
    .iter()
    .map(|field| field.name.as_str())
    .collect();
  assert_eq!(fields, ["@class", "@namespace", "from", "_odata_type"]);
}
