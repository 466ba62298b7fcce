use crate::generator::{
  TargetLanguage,
  operations::HttpMethod,
  snippets::{SnippetRequest, render_snippet, request_url},
};

const URL: &str = "https://management.example.com/deployments/{deploymentName}?api-version=2021-04-01";

fn request(method: HttpMethod, has_body: bool) -> SnippetRequest<'static> {
  SnippetRequest {
    operation_id: "Deployments_CreateOrUpdate",
    method,
    url: URL,
    has_body,
  }
}

#[test]
fn test_request_url() {
  assert_eq!(
    request_url("https://management.example.com", "/deployments/{deploymentName}", "2021-04-01"),
    URL
  );
  assert_eq!(request_url("", "/pets", "1.0"), "/pets?api-version=1.0");
}

#[test]
fn test_java_snippet() {
  let snippet = render_snippet(TargetLanguage::Java, &request(HttpMethod::Put, true));
  assert_eq!(snippet.language, TargetLanguage::Java);
  assert!(snippet.source.starts_with("// Deployments_CreateOrUpdate\n"));
  assert!(snippet.source.contains(&format!("URI.create(\"{URL}\")")));
  assert!(snippet.source.contains(".PUT(BodyPublishers.ofFile(Paths.get(\"body.json\")))"));

  let get = render_snippet(TargetLanguage::Java, &request(HttpMethod::Get, false)).source;
  assert!(get.contains(".GET()"));
  assert!(!get.contains("body.json"));

  let delete = render_snippet(TargetLanguage::Java, &request(HttpMethod::Delete, false)).source;
  assert!(delete.contains(".DELETE()"));

  let patch = render_snippet(TargetLanguage::Java, &request(HttpMethod::Patch, false)).source;
  assert!(patch.contains(".method(\"PATCH\", BodyPublishers.noBody())"));
}

#[test]
fn test_python_snippet() {
  let with_body = render_snippet(TargetLanguage::Python, &request(HttpMethod::Post, true)).source;
  assert!(with_body.starts_with("# Deployments_CreateOrUpdate\n"));
  assert!(with_body.contains("import requests"));
  assert!(with_body.contains(&format!("requests.post(\n  \"{URL}\",")));
  assert!(with_body.contains("files={\"file\": open(\"body.json\", \"r\")}"));

  let without_body = render_snippet(TargetLanguage::Python, &request(HttpMethod::Get, false)).source;
  assert!(without_body.contains("requests.get("));
  assert!(without_body.contains("headers=headers)"));
  assert!(!without_body.contains("files="));
}

#[test]
fn test_csharp_snippet() {
  let with_body = render_snippet(TargetLanguage::CSharp, &request(HttpMethod::Put, true)).source;
  assert!(with_body.starts_with("// Deployments_CreateOrUpdate\n"));
  assert!(with_body.contains(&format!("new HttpRequestMessage(HttpMethod.Put, \"{URL}\");")));
  assert!(with_body.contains("req.Content = new StringContent("));

  let without_body = render_snippet(TargetLanguage::CSharp, &request(HttpMethod::Delete, false)).source;
  assert!(without_body.contains("HttpMethod.Delete"));
  assert!(!without_body.contains("req.Content"));
}
