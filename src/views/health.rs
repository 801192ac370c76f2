pub fn health_html() -> &'static str {
    r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Worlds Launcher Health</title>
    <link href="/web/css/theme.css" rel="stylesheet">
  </head>
  <body>
    <main class="panel">
      <h1>Worlds Launcher</h1>
      <p class="muted">Status: ok</p>
      <pre class="log" id="output">Loading status...</pre>
    </main>
    <script>
      fetch('/api/status')
        .then((response) => response.json())
        .then((data) => {
          document.getElementById('output').textContent = JSON.stringify(data, null, 2);
        })
        .catch((error) => {
          document.getElementById('output').textContent = 'Error: ' + error;
        });
    </script>
  </body>
</html>
"#
}
