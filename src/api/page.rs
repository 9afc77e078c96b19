//! Single-page upload UI served at `GET /`.

use axum::response::Html;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Auditor HRSJC — Auditoria de Comunicação &amp; Valuation</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917; padding: 32px;
      max-width: 760px; margin: 0 auto;
    }
    h1 { font-size: 24px; margin-bottom: 8px; }
    h2 { font-size: 16px; margin: 24px 0 8px; }
    p, li { color: #57534e; font-size: 14px; }
    section { background: #fff; border: 1px solid #e7e5e4; border-radius: 12px; padding: 16px; margin-top: 16px; }
    input[type=password] { width: 100%; padding: 10px; border: 1px solid #d6d3d1; border-radius: 8px; }
    .btn {
      padding: 10px 16px; border-radius: 8px; font-size: 14px; font-weight: 500;
      cursor: pointer; border: none; margin-top: 8px; margin-right: 8px;
    }
    .btn-primary { background: #4a7c59; color: #fff; }
    .btn-secondary { background: #e7e5e4; color: #1c1917; }
    .btn:disabled { opacity: 0.5; cursor: not-allowed; }
    #status { margin-top: 12px; font-size: 14px; white-space: pre-wrap; }
    .error { color: #b91c1c; }
    .ok { color: #15803d; }
    pre { white-space: pre-wrap; font-size: 13px; margin-top: 12px; }
  </style>
</head>
<body>
  <h1>Auditoria de Comunicação &amp; Valuation</h1>
  <p>Envie os relatórios mensais em PDF e gere o relatório anual de inteligência com o valuation das entregas.</p>

  <section id="credential-section">
    <h2>Chave de API</h2>
    <input type="password" id="api-key" placeholder="Chave de API do Google">
    <button class="btn btn-secondary" id="save-key">Salvar chave</button>
  </section>

  <section>
    <h2>Relatórios mensais</h2>
    <input type="file" id="file" accept="application/pdf" multiple>
    <button class="btn btn-secondary" id="upload">Adicionar</button>
    <button class="btn btn-secondary" id="reset">Limpar sessão</button>
    <ul id="documents"></ul>
  </section>

  <section>
    <button class="btn btn-primary" id="generate" disabled>Gerar relatório anual</button>
    <a id="download" href="/api/session/report/download" hidden>Baixar relatório (.md)</a>
    <div id="status"></div>
    <pre id="report"></pre>
  </section>

  <script>
    const $ = (id) => document.getElementById(id);

    function setStatus(text, cls) {
      $('status').textContent = text;
      $('status').className = cls || '';
    }

    function render(view) {
      $('documents').innerHTML = '';
      view.documents.forEach((name) => {
        const li = document.createElement('li');
        li.textContent = name;
        $('documents').appendChild(li);
      });
      $('credential-section').hidden = view.credential_configured;
      $('generate').disabled = view.documents.length === 0;
      $('download').hidden = !view.report_available;
      if (!view.report_available) $('report').textContent = '';
    }

    async function call(method, url, body, headers) {
      const res = await fetch(url, { method, body, headers });
      const json = await res.json();
      if (!res.ok) {
        const err = json.error || {};
        throw new Error((err.message || res.statusText) + (err.hint ? '\n' + err.hint : ''));
      }
      return json;
    }

    async function refresh() {
      render(await call('GET', '/api/session'));
    }

    $('save-key').onclick = async () => {
      try {
        render(await call('PUT', '/api/session/credential',
          JSON.stringify({ api_key: $('api-key').value }),
          { 'Content-Type': 'application/json' }));
        $('api-key').value = '';
        setStatus('Chave configurada.', 'ok');
      } catch (e) { setStatus(e.message, 'error'); }
    };

    $('upload').onclick = async () => {
      const files = Array.from($('file').files);
      if (files.length === 0) return;
      const form = new FormData();
      files.forEach((file) => form.append('file', file));
      setStatus('Lendo ' + files.length + ' arquivo(s)...');
      try {
        const res = await call('POST', '/api/session/documents/batch', form);
        render(res.session);
        const lines = res.results.map((r) => r.status === 'ingested'
          ? r.receipt.document + ' adicionado.'
          : r.document + ': ' + r.message);
        const failed = res.results.some((r) => r.status === 'failed');
        setStatus(lines.join('\n'), failed ? 'error' : 'ok');
        $('file').value = '';
      } catch (e) { setStatus(e.message, 'error'); }
    };

    $('reset').onclick = async () => {
      render(await call('POST', '/api/session/reset'));
      setStatus('Sessão limpa.');
    };

    $('generate').onclick = async () => {
      $('generate').disabled = true;
      setStatus('Gerando relatório. Isso pode levar alguns minutos...');
      try {
        const res = await call('POST', '/api/session/report');
        render(res.session);
        $('report').textContent = res.report.markdown;
        setStatus('Relatório gerado.', 'ok');
      } catch (e) {
        setStatus(e.message, 'error');
        $('generate').disabled = false;
      }
    };

    refresh().catch((e) => setStatus(e.message, 'error'));
  </script>
</body>
</html>
"#;
