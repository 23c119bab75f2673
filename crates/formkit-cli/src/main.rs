//! FormKit CLI - Command-line interface for building form submission requests

use clap::{Parser, Subcommand, ValueEnum};
use formkit::collect::collect_fields;
use formkit::{
    form_to_request_with_options, Click, FormData, FormElement, HtmlDocument, HtmlElement,
    Request, SubmitOptions,
};
use serde::Serialize;
use std::error::Error;
use std::io::{self, Read, Write};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Output format for submit subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// JSON object with method, url, headers and body
    #[default]
    Json,
    /// Raw HTTP/1.1 request message
    Http,
}

/// FormKit - build the HTTP request an HTML form submission would send
#[derive(Parser, Debug)]
#[command(name = "formkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build the request for submitting a form
    Submit {
        /// HTML file to read, or - for stdin
        input: String,

        /// URL the HTML was loaded from
        #[arg(long)]
        url: Url,

        /// CSS selector of the form, or of an element inside it (default: first form)
        #[arg(long)]
        form: Option<String>,

        /// Field value to submit, repeatable (NAME=VALUE)
        #[arg(short, long = "data", value_parser = parse_pair)]
        data: Vec<(String, String)>,

        /// Field to leave out of the submission, repeatable
        #[arg(long)]
        remove: Vec<String>,

        /// CSS selector of the submit element to click
        #[arg(long, conflicts_with = "no_click")]
        click: Option<String>,

        /// Submit without clicking any submit element
        #[arg(long)]
        no_click: bool,

        /// Method to use instead of the form's
        #[arg(long)]
        method: Option<String>,

        /// Encoding to use instead of the form's
        #[arg(long)]
        enctype: Option<String>,

        /// Output format
        #[arg(long, short, default_value = "json")]
        output: OutputFormat,
    },
    /// List the forms of a document
    Forms {
        /// HTML file to read, or - for stdin
        input: String,

        /// URL the HTML was loaded from
        #[arg(long)]
        url: Url,
    },
}

/// Options of the submit subcommand
struct SubmitArgs {
    form: Option<String>,
    data: Vec<(String, String)>,
    remove: Vec<String>,
    click: Option<String>,
    no_click: bool,
    method: Option<String>,
    enctype: Option<String>,
}

/// JSON rendering of a request
#[derive(Debug, Serialize)]
struct RequestOutput {
    method: String,
    url: String,
    headers: Vec<(String, String)>,
    body: String,
}

impl From<&Request> for RequestOutput {
    fn from(request: &Request) -> Self {
        Self {
            method: request.method.to_string(),
            url: request.url.to_string(),
            headers: request.headers.clone(),
            body: String::from_utf8_lossy(&request.body).into_owned(),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Submit {
            input,
            url,
            form,
            data,
            remove,
            click,
            no_click,
            method,
            enctype,
            output,
        }) => read_input(&input).and_then(|html| {
            let args = SubmitArgs {
                form,
                data,
                remove,
                click,
                no_click,
                method,
                enctype,
            };
            let request = build_request(&html, url, &args)?;
            format_request(&request, output)
        }),
        Some(Commands::Forms { input, url }) => {
            read_input(&input).map(|html| format_forms(&HtmlDocument::parse(&html, Some(url))))
        }
        None => {
            eprintln!("Usage: formkit submit <FILE> --url <URL>");
            eprintln!("   or: formkit forms <FILE> --url <URL>");
            eprintln!("   or: formkit --help");
            std::process::exit(1);
        }
    };

    match result {
        Ok(output) => writeln_safe(&output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Parse a NAME=VALUE argument
fn parse_pair(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {arg:?}")),
    }
}

/// Read HTML from a file, or from stdin for `-`
fn read_input(input: &str) -> Result<String, Box<dyn Error>> {
    debug!(input, "Reading HTML");
    if input == "-" {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        std::fs::read_to_string(input).map_err(|e| format!("{input}: {e}").into())
    }
}

fn build_request(html: &str, url: Url, args: &SubmitArgs) -> Result<Request, Box<dyn Error>> {
    let doc = HtmlDocument::parse(html, Some(url));

    let form = match args.form.as_deref() {
        Some(css) => doc.form(css)?,
        None => doc.forms().into_iter().next(),
    }
    .ok_or("no matching form found")?;

    let mut data = FormData::new();
    for (name, value) in &args.data {
        data.append(name, value);
    }
    for name in &args.remove {
        data.remove(name);
    }

    let options = SubmitOptions::new()
        .data(data)
        .click(click_choice(&form, args)?);
    let options = match &args.method {
        Some(method) => options.method(method),
        None => options,
    };
    let options = match &args.enctype {
        Some(enctype) => options.enctype(enctype),
        None => options,
    };

    Ok(form_to_request_with_options(&form, &options)?)
}

fn click_choice<'a>(
    form: &HtmlElement<'a>,
    args: &SubmitArgs,
) -> Result<Click<HtmlElement<'a>>, Box<dyn Error>> {
    if args.no_click {
        return Ok(Click::Disabled);
    }
    match args.click.as_deref() {
        Some(css) => {
            let element = form
                .select(css)?
                .into_iter()
                .next()
                .ok_or_else(|| format!("no element matches {css:?} inside the form"))?;
            Ok(Click::Element(element))
        }
        None => Ok(Click::Default),
    }
}

fn format_request(request: &Request, output: OutputFormat) -> Result<String, Box<dyn Error>> {
    match output {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&RequestOutput::from(request))?),
        OutputFormat::Http => Ok(format_http(request)),
    }
}

/// Format request as an HTTP/1.1 message
fn format_http(request: &Request) -> String {
    let url = &request.url;
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut output = format!("{} {} HTTP/1.1\r\n", request.method, target);
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => output.push_str(&format!("Host: {}:{}\r\n", host, port)),
            None => output.push_str(&format!("Host: {}\r\n", host)),
        }
    }
    for (name, value) in &request.headers {
        output.push_str(&format!("{}: {}\r\n", name, value));
    }
    if !request.body.is_empty() {
        output.push_str(&format!("Content-Length: {}\r\n", request.body.len()));
    }
    output.push_str("\r\n");
    output.push_str(&String::from_utf8_lossy(&request.body));
    output
}

/// Format one line per form: index, method, action and field names
fn format_forms(doc: &HtmlDocument) -> String {
    let forms = doc.forms();
    if forms.is_empty() {
        return "No forms found".to_string();
    }

    let mut lines = Vec::new();
    for (i, form) in forms.iter().enumerate() {
        let mut names: Vec<String> = Vec::new();
        for (name, _) in collect_fields(form) {
            if !names.contains(&name) {
                names.push(name);
            }
        }

        let id = form
            .attr("id")
            .map(|id| format!(" #{}", id))
            .unwrap_or_default();
        let options = SubmitOptions::new().no_click();
        match form_to_request_with_options(form, &options) {
            Ok(request) => {
                let mut action = request.url.clone();
                if request.method == "GET" {
                    action.set_query(None);
                }
                lines.push(format!(
                    "[{}]{} {} {} fields: {}",
                    i,
                    id,
                    request.method,
                    action,
                    names.join(", ")
                ));
            }
            Err(e) => lines.push(format!("[{}]{} error: {}", i, id, e)),
        }
    }
    lines.join("\n")
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
