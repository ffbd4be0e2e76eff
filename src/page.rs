/// Upload page served at `/`. Posts the file as `image` to `/api/analyze`
/// and renders each tag with its confidence as a percentage.
pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Image Tagger</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, Cantarell, sans-serif;
            background: #f4f5fb;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            padding: 20px;
        }

        .card {
            background: white;
            border-radius: 16px;
            box-shadow: 0 10px 40px rgba(0,0,0,0.12);
            max-width: 640px;
            width: 100%;
            padding: 32px;
        }

        h1 {
            color: #222;
            font-size: 1.6em;
            margin-bottom: 6px;
        }

        .hint {
            color: #777;
            font-size: 0.9em;
            margin-bottom: 24px;
        }

        form {
            display: flex;
            gap: 12px;
            align-items: center;
        }

        button {
            background: #4f5bd5;
            color: white;
            border: none;
            border-radius: 8px;
            padding: 10px 18px;
            font-weight: 600;
            cursor: pointer;
        }

        button:disabled {
            background: #aab0e8;
            cursor: default;
        }

        .preview {
            max-width: 100%;
            border-radius: 10px;
            margin-top: 20px;
            display: none;
        }

        .error {
            color: #b00020;
            margin-top: 16px;
            display: none;
        }

        .tags {
            list-style: none;
            margin-top: 20px;
        }

        .tags li {
            display: flex;
            justify-content: space-between;
            padding: 8px 12px;
            border-bottom: 1px solid #eee;
        }

        .confidence {
            color: #4f5bd5;
            font-weight: 600;
        }
    </style>
</head>
<body>
    <div class="card">
        <h1>Image Tagger</h1>
        <p class="hint">JPG, PNG or WEBP, up to 5MB.</p>

        <form id="uploadForm">
            <input type="file" id="fileInput" name="image" accept="image/jpeg,image/png,image/webp">
            <button type="submit" id="submitButton" disabled>Analyze</button>
        </form>

        <div class="error" id="error"></div>
        <img class="preview" id="preview" alt="Preview">
        <ul class="tags" id="tags"></ul>
    </div>

    <script>
        const MAX_BYTES = 5 * 1024 * 1024;

        const form = document.getElementById('uploadForm');
        const fileInput = document.getElementById('fileInput');
        const submitButton = document.getElementById('submitButton');
        const preview = document.getElementById('preview');
        const tagList = document.getElementById('tags');
        const errorDiv = document.getElementById('error');

        function showError(message) {
            errorDiv.textContent = message;
            errorDiv.style.display = message ? 'block' : 'none';
        }

        fileInput.addEventListener('change', () => {
            const file = fileInput.files[0];
            tagList.innerHTML = '';
            showError('');
            submitButton.disabled = true;
            if (preview.src) {
                URL.revokeObjectURL(preview.src);
                preview.removeAttribute('src');
            }
            preview.style.display = 'none';

            if (!file) {
                return;
            }
            if (file.size > MAX_BYTES) {
                showError('File size must be less than 5MB');
                return;
            }

            preview.src = URL.createObjectURL(file);
            preview.style.display = 'block';
            submitButton.disabled = false;
        });

        form.addEventListener('submit', async (e) => {
            e.preventDefault();
            const file = fileInput.files[0];
            if (!file) {
                showError('Please select an image first');
                return;
            }

            const formData = new FormData();
            formData.append('image', file);

            submitButton.disabled = true;
            submitButton.textContent = 'Analyzing...';
            showError('');

            try {
                const response = await fetch('/api/analyze', {
                    method: 'POST',
                    body: formData
                });
                const result = await response.json();

                if (!response.ok) {
                    throw new Error(result.details || result.error || 'Upload failed');
                }

                tagList.innerHTML = '';
                for (const tag of result.tags) {
                    const item = document.createElement('li');
                    const label = document.createElement('span');
                    const confidence = document.createElement('span');
                    label.textContent = tag.label;
                    confidence.className = 'confidence';
                    confidence.textContent = Math.round(tag.confidence * 100) + '%';
                    item.append(label, confidence);
                    tagList.appendChild(item);
                }
            } catch (error) {
                showError('Error: ' + error.message);
            } finally {
                submitButton.disabled = false;
                submitButton.textContent = 'Analyze';
            }
        });
    </script>
</body>
</html>
"#;
