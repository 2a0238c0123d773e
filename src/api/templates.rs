//! Embedded HTML for the home page.

use std::fmt::Write;

/// Endpoints listed on the home page.
pub const ENDPOINTS: &[(&str, &str)] = &[
    ("/", "This homepage"),
    ("/health", "Health check endpoint"),
    ("/ready", "Readiness check endpoint"),
    ("/info", "Application information (JSON)"),
    ("/api/status", "API status endpoint (JSON)"),
];

/// Platform components listed on the home page.
pub const COMPONENTS: &[(&str, &str)] = &[
    ("k3d", "Lightweight Kubernetes cluster"),
    ("Argo CD", "GitOps continuous delivery"),
    ("Kyverno", "Policy management and security"),
    ("Tailscale", "Secure networking and remote access"),
    ("Sealed Secrets", "Encrypted secret management"),
    ("Traefik", "Ingress controller and load balancer"),
];

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>apqx-platform Sample App</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        body {
            font-family: Arial, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            background-color: #f5f5f5;
        }
        .container {
            background-color: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1 { color: #333; }
        .info {
            background-color: #e7f3ff;
            padding: 15px;
            border-radius: 4px;
            margin: 20px 0;
        }
        .endpoint {
            background-color: #f8f9fa;
            padding: 10px;
            margin: 10px 0;
            border-left: 4px solid #007bff;
        }
        code {
            background-color: #f1f1f1;
            padding: 2px 4px;
            border-radius: 3px;
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>🚀 apqx-platform Sample Application</h1>
"#;

const FOOT: &str = r#"
        <p><em>This application is deployed using GitOps principles with immutable container images.</em></p>
    </div>
</body>
</html>
"#;

/// Values interpolated into the home page.
#[derive(Debug, Clone, Copy)]
pub struct HomePage<'a> {
    pub name: &'a str,
    pub version: &'a str,
    pub started: &'a str,
    pub uptime: &'a str,
}

impl HomePage<'_> {
    /// Render the full document.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut html = String::with_capacity(HEAD.len() + FOOT.len() + 2048);
        html.push_str(HEAD);

        write!(
            html,
            r#"
        <div class="info">
            <strong>GitOps Platform Status:</strong> Running successfully!<br>
            <strong>Application:</strong> {} v{}<br>
            <strong>Started:</strong> {}<br>
            <strong>Uptime:</strong> {}
        </div>
"#,
            escape(self.name),
            escape(self.version),
            escape(self.started),
            escape(self.uptime),
        )?;

        html.push_str("\n        <h2>Available Endpoints</h2>\n");
        for (path, about) in ENDPOINTS {
            writeln!(
                html,
                r#"        <div class="endpoint">
            <strong>GET {path}</strong> - {about}
        </div>"#
            )?;
        }

        html.push_str("\n        <h2>Platform Components</h2>\n        <ul>\n");
        for (component, about) in COMPONENTS {
            writeln!(
                html,
                "            <li><strong>{component}</strong> - {about}</li>"
            )?;
        }
        html.push_str("        </ul>\n");

        html.push_str(FOOT);
        Ok(html)
    }
}

/// Minimal HTML text escaping.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
