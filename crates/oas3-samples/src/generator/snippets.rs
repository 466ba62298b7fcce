use serde::Serialize;

use super::{languages::TargetLanguage, operations::HttpMethod};

const BODY_FILE: &str = "body.json";

/// Fixed-template HTTP request code for one operation in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestSnippet {
  pub language: TargetLanguage,
  pub source: String,
}

/// What a snippet template interpolates.
#[derive(Debug, Clone, Copy)]
pub struct SnippetRequest<'a> {
  pub operation_id: &'a str,
  pub method: HttpMethod,
  pub url: &'a str,
  /// Whether the operation has a synthesized request body to attach.
  pub has_body: bool,
}

/// `{base}{path}?api-version={version}`
#[must_use]
pub fn request_url(base_url: &str, path: &str, api_version: &str) -> String {
  format!("{base_url}{path}?api-version={api_version}")
}

#[must_use]
pub fn render_snippet(language: TargetLanguage, request: &SnippetRequest<'_>) -> RequestSnippet {
  let source = match language {
    TargetLanguage::Java => java(request),
    TargetLanguage::CSharp => csharp(request),
    TargetLanguage::Python => python(request),
  };
  RequestSnippet { language, source }
}

/// Java 11 `HttpClient`, synchronous.
fn java(request: &SnippetRequest<'_>) -> String {
  let publisher = if request.has_body {
    format!("BodyPublishers.ofFile(Paths.get(\"{BODY_FILE}\"))")
  } else {
    "BodyPublishers.noBody()".to_string()
  };
  let method = match request.method {
    HttpMethod::Get => ".GET()".to_string(),
    HttpMethod::Delete if !request.has_body => ".DELETE()".to_string(),
    HttpMethod::Post | HttpMethod::Put => format!(".{}({publisher})", request.method.as_upper()),
    other => format!(".method(\"{}\", {publisher})", other.as_upper()),
  };

  format!(
    r#"// {operation_id}

HttpClient client = HttpClient.newHttpClient();

HttpRequest request = HttpRequest.newBuilder()
  .uri(URI.create("{url}"))
  .header("Content-Type", "application/json")
  {method}
  .build();

HttpResponse<String> response = client.send(request, BodyHandlers.ofString());
System.out.println(response.statusCode());
System.out.println(response.body());
"#,
    operation_id = request.operation_id,
    url = request.url,
  )
}

/// Python `requests`, synchronous.
fn python(request: &SnippetRequest<'_>) -> String {
  let files = if request.has_body {
    format!(",\n  files={{\"file\": open(\"{BODY_FILE}\", \"r\")}}")
  } else {
    String::new()
  };

  format!(
    r#"# {operation_id}

import requests

headers = {{"Content-Type": "application/json"}}

response = requests.{method}(
  "{url}",
  headers=headers{files})

print(response.status_code)
print(response.content)
"#,
    operation_id = request.operation_id,
    method = request.method,
    url = request.url,
  )
}

/// C# `HttpClient`, asynchronous.
fn csharp(request: &SnippetRequest<'_>) -> String {
  let content = if request.has_body {
    format!(
      "\nreq.Content = new StringContent(System.IO.File.ReadAllText(@\"{BODY_FILE}\"), Encoding.UTF8, \"application/json\");"
    )
  } else {
    String::new()
  };

  format!(
    r#"// {operation_id}

HttpClient client = new HttpClient();
HttpRequestMessage req = new HttpRequestMessage(HttpMethod.{method}, "{url}");{content}

HttpResponseMessage httpResponseMessage = await client.SendAsync(req);
httpResponseMessage.EnsureSuccessStatusCode();
HttpContent httpContent = httpResponseMessage.Content;
string responseString = await httpContent.ReadAsStringAsync();
string responseStatus = httpResponseMessage.StatusCode.ToString();
Console.WriteLine(responseString);
Console.WriteLine(responseStatus);
"#,
    operation_id = request.operation_id,
    method = request.method.as_capitalized(),
    url = request.url,
  )
}
