//! Embedded dashboard page.
//!
//! A single static HTML document; all data comes from the JSON API.

use axum::response::Html;

/// Serve the dashboard HTML.
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Nginx Dashboard</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6f8; color: #1d2330; }
        header { background: #1d2330; color: #fff; padding: 0.8rem 1.5rem; }
        main { padding: 1.5rem; display: grid; gap: 1.5rem; }
        section { background: #fff; border-radius: 6px; padding: 1rem 1.25rem; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
        table { width: 100%; border-collapse: collapse; }
        th, td { text-align: left; padding: 0.35rem 0.5rem; border-bottom: 1px solid #e4e6eb; vertical-align: top; }
        .on { color: #1a7f37; font-weight: 600; }
        .off { color: #8c959f; }
        .err { color: #cf222e; }
        pre { background: #0d1117; color: #c9d1d9; padding: 0.75rem; max-height: 28rem; overflow: auto; }
        button, input, select { font: inherit; padding: 0.2rem 0.5rem; }
    </style>
</head>
<body>
    <header><h1>Nginx Dashboard</h1></header>
    <main>
        <section>
            <h2>Sites <button onclick="loadSites()">Refresh</button></h2>
            <table>
                <thead><tr><th>Name</th><th>State</th><th>Hostnames</th><th>Ports</th><th>Backends</th><th></th></tr></thead>
                <tbody id="sites"></tbody>
            </table>
        </section>
        <section>
            <h2>Logs</h2>
            <select id="log-name"></select>
            <input id="log-lines" type="number" min="0" value="200">
            <button onclick="loadTail()">Show</button>
            <pre id="log-tail"></pre>
        </section>
        <section>
            <h2>Ping</h2>
            <input id="ping-url" placeholder="example.com">
            <button onclick="ping(document.getElementById('ping-url').value)">Ping</button>
            <span id="ping-result"></span>
        </section>
    </main>
    <script>
        function esc(s) {
            return String(s).replace(/[&<>"']/g, c => ({'&':'&amp;','<':'&lt;','>':'&gt;','"':'&quot;',"'":'&#39;'}[c]));
        }

        async function loadSites() {
            const res = await fetch('/api/sites');
            const body = document.getElementById('sites');
            if (!res.ok) {
                body.innerHTML = '<tr><td colspan="6" class="err">' + esc((await res.json()).detail) + '</td></tr>';
                return;
            }
            const { sites } = await res.json();
            body.innerHTML = sites.map(s => '<tr>' +
                '<td>' + esc(s.name) + '</td>' +
                '<td class="' + (s.active ? 'on">enabled' : 'off">disabled') + '</td>' +
                '<td>' + s.hostnames.map(esc).join('<br>') + '</td>' +
                '<td>' + s.ports.map(esc).join(', ') + '</td>' +
                '<td>' + s.backends.map(esc).join('<br>') + '</td>' +
                '<td>' + (s.hostnames.length ? '<button data-host="' + esc(s.hostnames[0]) + '" onclick="ping(this.dataset.host)">ping</button>' : '') + '</td>' +
                '</tr>').join('');
        }

        async function loadLogs() {
            const res = await fetch('/api/logs');
            if (!res.ok) return;
            const { logs } = await res.json();
            document.getElementById('log-name').innerHTML = logs.map(l => '<option>' + esc(l) + '</option>').join('');
        }

        async function loadTail() {
            const name = document.getElementById('log-name').value;
            const lines = document.getElementById('log-lines').value;
            if (!name) return;
            const res = await fetch('/api/logs/' + encodeURIComponent(name) + '?lines=' + encodeURIComponent(lines));
            document.getElementById('log-tail').textContent = res.ok ? await res.text() : (await res.json()).detail;
        }

        async function ping(target) {
            const out = document.getElementById('ping-result');
            out.textContent = 'probing ' + target + '...';
            const res = await fetch('/api/ping?url=' + encodeURIComponent(target));
            const body = await res.json();
            out.textContent = body.status_code !== undefined
                ? body.url + ' -> ' + body.status_code
                : (body.url ? body.url + ': ' : '') + (body.error || body.detail);
            out.className = res.ok ? 'on' : 'err';
        }

        loadSites();
        loadLogs();
    </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_dashboard() {
        let Html(body) = index().await;
        assert!(body.starts_with("<!DOCTYPE html>"));
        assert!(body.contains("/api/sites"));
        assert!(body.contains("/api/ping"));
    }
}
